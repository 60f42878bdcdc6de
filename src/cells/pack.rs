use crate::cells::types::{Battery, Clamp, ConnectionType, PackError};

/// A composite of cells or nested packs wired under one topology.
///
/// A pack stores no voltage, capacity or charge of its own. Every query is
/// derived from the members at call time, so edits through
/// [`Pack::cells_mut`] are reflected immediately.
///
/// # Aggregation
///
/// | Query    | Series          | Parallel            |
/// |----------|-----------------|---------------------|
/// | voltage  | sum             | first member        |
/// | capacity | minimum         | sum                 |
/// | charge   | minimum         | sum                 |
///
/// # Examples
///
/// ```
/// use pack_sim::cells::{Battery, Cell, ConnectionType, Pack};
///
/// let mut pack = Pack::new(ConnectionType::Parallel);
/// pack.add(Cell::new(3.7, 2000.0, 2000.0));
/// pack.add(Cell::new(3.7, 1000.0, 1000.0));
/// assert_eq!(pack.voltage(), Ok(3.7));
/// assert_eq!(pack.capacity(), 3000.0);
/// ```
#[derive(Debug, Default)]
pub struct Pack {
    connection: ConnectionType,
    cells: Vec<Box<dyn Battery>>,
}

impl Pack {
    /// Creates an empty pack with a fixed topology.
    pub fn new(connection: ConnectionType) -> Self {
        Self {
            connection,
            cells: Vec::new(),
        }
    }

    /// Appends a member, taking ownership of it.
    pub fn add(&mut self, member: impl Battery + 'static) {
        self.cells.push(Box::new(member));
    }

    /// Appends an already boxed member.
    pub fn add_boxed(&mut self, member: Box<dyn Battery>) {
        self.cells.push(member);
    }

    /// Removes the member at `index`, preserving the order of the rest.
    ///
    /// # Returns
    ///
    /// * `Some(member)` - The removed member, handed back to the caller
    /// * `None` - If `index` is out of range; the pack is left unchanged
    pub fn delete_battery(&mut self, index: usize) -> Option<Box<dyn Battery>> {
        if index < self.cells.len() {
            Some(self.cells.remove(index))
        } else {
            None
        }
    }

    /// Live view of the members in insertion order.
    pub fn cells(&self) -> &[Box<dyn Battery>] {
        &self.cells
    }

    /// Live mutable view of the membership list.
    ///
    /// Callers may reorder, remove or insert members directly; aggregate
    /// queries pick the changes up on the next call.
    pub fn cells_mut(&mut self) -> &mut Vec<Box<dyn Battery>> {
        &mut self.cells
    }

    /// Topology chosen at construction.
    pub fn connection_type(&self) -> ConnectionType {
        self.connection
    }

    /// Number of direct members.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the pack has no members.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Consumes the pack and returns its members in order.
    pub fn into_cells(self) -> Vec<Box<dyn Battery>> {
        self.cells
    }

    /// Rebuilds the pack under another topology.
    ///
    /// Topology is fixed for the lifetime of a pack; this constructs a new
    /// pack and moves the same members into it in the same order.
    pub fn retype(self, connection: ConnectionType) -> Self {
        let mut pack = Self::new(connection);
        for member in self.into_cells() {
            pack.add_boxed(member);
        }
        pack
    }

    fn min_over(&self, f: impl Fn(&dyn Battery) -> f64) -> f64 {
        self.cells
            .iter()
            .map(|b| f(b.as_ref()))
            .reduce(f64::min)
            .unwrap_or(0.0)
    }

    fn sum_over(&self, f: impl Fn(&dyn Battery) -> f64) -> f64 {
        self.cells.iter().map(|b| f(b.as_ref())).sum()
    }
}

impl Battery for Pack {
    fn use_for(&mut self, hours: f64) -> Vec<Clamp> {
        self.cells
            .iter_mut()
            .flat_map(|b| b.use_for(hours))
            .collect()
    }

    fn recharge(&mut self, hours: f64) -> Vec<Clamp> {
        self.cells
            .iter_mut()
            .flat_map(|b| b.recharge(hours))
            .collect()
    }

    fn voltage(&self) -> Result<f64, PackError> {
        match self.connection {
            ConnectionType::Series => self.cells.iter().map(|b| b.voltage()).sum(),
            ConnectionType::Parallel => self
                .cells
                .first()
                .ok_or(PackError::NoMembers)
                .and_then(|b| b.voltage()),
        }
    }

    fn capacity(&self) -> f64 {
        match self.connection {
            ConnectionType::Series => self.min_over(|b| b.capacity()),
            ConnectionType::Parallel => self.sum_over(|b| b.capacity()),
        }
    }

    fn charge(&self) -> f64 {
        match self.connection {
            ConnectionType::Series => self.min_over(|b| b.charge()),
            ConnectionType::Parallel => self.sum_over(|b| b.charge()),
        }
    }
}
