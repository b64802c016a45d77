use serde::{Deserialize, Serialize};

use super::{Delivery, DeliveryStatus};

/// Ordering applied to list results after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
    /// Collection (insertion) order.
    #[default]
    Stored,
    /// `updatedAt` descending; ties keep collection order.
    RecentlyUpdated,
}

/// Query for listing deliveries.
///
/// The status and text filters are ANDed. The text filter is a case-insensitive
/// substring match ORed across tracking number, origin city, destination city and
/// cargo description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryFilter {
    pub status: Option<DeliveryStatus>,
    pub text: Option<String>,
    /// Exact (case-insensitive) tracking number.
    pub tracking_number: Option<String>,
    pub order: ListOrder,
    pub limit: Option<usize>,
}

impl DeliveryFilter {
    /// Matches every delivery.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_tracking_number(code: impl Into<String>) -> Self {
        Self {
            tracking_number: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: DeliveryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn recently_updated(mut self) -> Self {
        self.order = ListOrder::RecentlyUpdated;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, delivery: &Delivery) -> bool {
        if self.status.is_some_and(|status| status != delivery.status) {
            return false;
        }
        if let Some(code) = &self.tracking_number {
            if !delivery.tracking_number.matches_code(code) {
                return false;
            }
        }
        match self.text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                [
                    delivery.tracking_number.as_str(),
                    delivery.origin.city.as_str(),
                    delivery.destination.city.as_str(),
                    delivery.cargo.description.as_str(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }

    /// Applies ordering and limit to already-filtered results.
    pub fn arrange(&self, mut deliveries: Vec<Delivery>) -> Vec<Delivery> {
        if self.order == ListOrder::RecentlyUpdated {
            // `sort_by` is stable, so equal timestamps keep collection order.
            deliveries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        }
        if let Some(limit) = self.limit {
            deliveries.truncate(limit);
        }
        deliveries
    }
}

/// Per-status totals for a dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub in_transit: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn tally<'a>(deliveries: impl IntoIterator<Item = &'a Delivery>) -> Self {
        deliveries.into_iter().fold(Self::default(), |mut counts, delivery| {
            counts.total += 1;
            match delivery.status {
                DeliveryStatus::Pending => counts.pending += 1,
                DeliveryStatus::InTransit => counts.in_transit += 1,
                DeliveryStatus::Delivered => counts.delivered += 1,
                DeliveryStatus::Cancelled => counts.cancelled += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: DeliveryStatus) -> usize {
        match status {
            DeliveryStatus::Pending => self.pending,
            DeliveryStatus::InTransit => self.in_transit,
            DeliveryStatus::Delivered => self.delivered,
            DeliveryStatus::Cancelled => self.cancelled,
        }
    }
}
