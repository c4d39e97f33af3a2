use crate::seq_list::SequentialList;

/// Represents a registered customer.
///
/// The order history holds positions in the catalog's master order list, in
/// placement order. It only grows through
/// [`Catalog::place_order`](crate::Catalog::place_order), which appends to the
/// history and to the master order list in one step; resolve it with
/// [`Catalog::order_history`](crate::Catalog::order_history).
///
/// Positions stay valid because the master order list is append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    id: String,
    name: String,
    email: String,
    order_history: SequentialList<usize>,
}

impl Customer {
    /// Creates a new Customer with an empty order history.
    ///
    /// # Arguments
    /// * `id` - Unique identifier
    /// * `name` - Customer's display name
    /// * `email` - Customer's email address
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            order_history: SequentialList::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Number of orders this customer placed.
    pub fn order_count(&self) -> usize {
        self.order_history.len()
    }

    pub(crate) fn order_positions(&self) -> &SequentialList<usize> {
        &self.order_history
    }

    pub(crate) fn add_order_to_history(&mut self, position: usize) {
        self.order_history.append(position);
    }
}
