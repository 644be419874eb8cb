use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Places the target number of mines uniformly at random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, layout: &mut MineLayout) -> Result<()> {
        let total_cells = usize::from(layout.total_cells());
        let target = usize::from(layout.target());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        layout.clear();
        // goes through toggle so the cap is enforced the same way as manual placement
        for cell in index::sample(&mut rng, total_cells, target) {
            layout.toggle(cell as CellIndex)?;
        }

        if !layout.is_ready() {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                layout.placed(),
                layout.target()
            );
        }
        log::debug!("Generated {} mines with seed {}", layout.placed(), self.seed);
        Ok(())
    }
}
