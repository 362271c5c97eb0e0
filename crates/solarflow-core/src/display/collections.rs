//! Collection wrapper types for displaying groups of domain objects.
//!
//! Newtype wrappers give collections a `Display` implementation with
//! graceful empty-collection handling, so callers never special-case the
//! empty listing.

use std::{fmt, ops::Index};

use crate::models::{OrderSummary, Warehouse};

/// Newtype wrapper for displaying collections of order summaries.
pub struct OrderSummaries(pub Vec<OrderSummary>);

impl OrderSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of order summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the order summary at the given index.
    pub fn get(&self, index: usize) -> Option<&OrderSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the order summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, OrderSummary> {
        self.0.iter()
    }
}

impl Index<usize> for OrderSummaries {
    type Output = OrderSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for OrderSummaries {
    type Item = OrderSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderSummaries {
    type Item = &'a OrderSummary;
    type IntoIter = std::slice::Iter<'a, OrderSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for OrderSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No orders found.")
        } else {
            for order in &self.0 {
                write!(f, "{order}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the warehouse registry.
pub struct Warehouses(pub Vec<Warehouse>);

impl Warehouses {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Warehouse> {
        self.0.iter()
    }
}

impl fmt::Display for Warehouses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No warehouses registered.")
        } else {
            for warehouse in &self.0 {
                write!(f, "{warehouse}")?;
            }
            Ok(())
        }
    }
}
