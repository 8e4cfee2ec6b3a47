use crate::{ModuleError, OperationTable};

/// An executable module unit.
///
/// `register` is called exactly once, when the host binds the module. It
/// may fail (a missing external tool, a bad environment); the host then lists
/// the module without making it dispatchable.
pub trait Module: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn register(&self, table: &mut OperationTable) -> Result<(), ModuleError>;
}
