use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    /// Replaces the placed mines of `layout` with exactly `layout.target()` new ones.
    fn generate(self, layout: &mut MineLayout) -> Result<()>;
}
