/// Cooperative yielding for long grid scans.
///
/// The grid differ calls [`YieldPoint::yield_now`] after each completed row
/// batch so one large comparison does not monopolize its execution context.
/// This is purely a scheduling hook: the input grids are never mutated across
/// a yield, so no synchronization is implied.
pub trait YieldPoint {
    fn yield_now(&mut self);
}

/// No-op yield for callers that own their thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoYield;

impl YieldPoint for NoYield {
    fn yield_now(&mut self) {}
}
