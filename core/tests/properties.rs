use gemsweeper_core::{
    Bet, Board, BoardCell, CellCount, CellIndex, Coord, GameConfig, GameError, GameSession,
    LayoutGenerator, MineLayout, Phase, RandomLayoutGenerator, RevealOutcome, profit_from,
};
use proptest::prelude::*;

const SIDE: Coord = 5;
const TOTAL: CellCount = 25;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// Mine target plus a layout seed
fn seeded_layout() -> impl Strategy<Value = (CellCount, u64)> {
    (1..TOTAL, any::<u64>())
}

fn ready_layout(mines: CellCount, seed: u64) -> MineLayout {
    let mut layout = MineLayout::new(GameConfig::new(SIDE, mines));
    RandomLayoutGenerator::new(seed)
        .generate(&mut layout)
        .expect("generator stays within the target");
    layout
}

fn stake() -> impl Strategy<Value = f64> {
    prop_oneof![0.01..1.0f64, 1.0..1_000.0f64]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn finalized_layout_has_exact_counts((mines, seed) in seeded_layout()) {
        let layout = ready_layout(mines, seed);
        let set = layout.finalize().unwrap();
        let board = Board::new(&set);

        let mine_cells = (0..TOTAL)
            .filter(|&i| board.cell_at(i) == Ok(BoardCell::Mine))
            .count();
        prop_assert_eq!(set.len(), usize::from(mines));
        prop_assert_eq!(mine_cells, usize::from(mines));
        prop_assert_eq!(board.safe_cells(), TOTAL - mines);
    }

    #[test]
    fn toggle_never_exceeds_target(
        mines in 1..TOTAL,
        toggles in proptest::collection::vec(0..TOTAL, 0..80),
    ) {
        let mut layout = MineLayout::new(GameConfig::new(SIDE, mines));
        for index in toggles {
            let before = layout.clone();
            match layout.toggle(index) {
                Ok(_) => {}
                Err(GameError::MineCapReached { .. }) => {
                    prop_assert_eq!(&layout, &before);
                }
                Err(other) => return Err(TestCaseError::fail(format!("{other}"))),
            }
            prop_assert!(layout.placed() <= layout.target());
            prop_assert_eq!(
                usize::from(layout.placed()),
                layout.mine_indices().count()
            );
        }
    }

    #[test]
    fn safe_reveals_grow_multiplier_by_step(
        (mines, seed) in seeded_layout(),
        bet in stake(),
    ) {
        let layout = ready_layout(mines, seed);
        let mut session = GameSession::default();
        session.start_round(&layout, bet).unwrap();
        let step = session.payout().step_for(layout.config());

        let mut previous = session.multiplier();
        let mut k: CellCount = 0;
        for index in (0..TOTAL).filter(|&i| !layout.contains_mine(i)) {
            session.reveal(index).unwrap();
            k += 1;
            prop_assert!(session.multiplier() >= previous);
            prop_assert!(close(session.multiplier(), 1.08 + f64::from(k) * step));
            prop_assert!(close(session.profit(), bet * (session.multiplier() - 1.0)));
            previous = session.multiplier();
        }

        prop_assert_eq!(session.phase(), Phase::Won);
        let settlement = session.settlement().unwrap();
        let expected = profit_from(Bet::new(bet).unwrap(), settlement.multiplier);
        prop_assert!(close(settlement.profit, expected));
    }

    #[test]
    fn mine_ends_round_without_touching_profit(
        (mines, seed) in seeded_layout(),
        safe_first in 0usize..24,
    ) {
        let layout = ready_layout(mines, seed);
        let mut session = GameSession::default();
        session.start_round(&layout, 10.0).unwrap();

        let safe: Vec<CellIndex> = (0..TOTAL).filter(|&i| !layout.contains_mine(i)).collect();
        // leave one safe cell covered so the round can't auto-win
        for &index in safe.iter().take(safe_first.min(safe.len() - 1)) {
            session.reveal(index).unwrap();
        }
        let profit = session.profit();
        let multiplier = session.multiplier();

        let mine = layout.mine_indices().next().unwrap();
        prop_assert_eq!(session.reveal(mine), Ok(RevealOutcome::HitMine));
        prop_assert_eq!(session.phase(), Phase::Lost);
        prop_assert_eq!(session.profit(), profit);
        prop_assert_eq!(session.multiplier(), multiplier);
        prop_assert_eq!(session.cashout(), Err(GameError::NotActive));
    }

    #[test]
    fn repeated_reveal_is_idempotent(
        (mines, seed) in seeded_layout(),
        picks in proptest::collection::vec(0..TOTAL, 1..30),
    ) {
        let layout = ready_layout(mines, seed);
        let mut once = GameSession::default();
        let mut twice = GameSession::default();
        once.start_round(&layout, 3.0).unwrap();
        twice.start_round(&layout, 3.0).unwrap();

        for index in picks {
            once.reveal(index).unwrap();
            twice.reveal(index).unwrap();
            twice.reveal(index).unwrap();
        }

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn cashout_freezes_profit(
        (mines, seed) in seeded_layout(),
        picks in proptest::collection::vec(0..TOTAL, 0..10),
        later in proptest::collection::vec(0..TOTAL, 1..10),
    ) {
        let layout = ready_layout(mines, seed);
        let mut session = GameSession::default();
        session.start_round(&layout, 10.0).unwrap();
        for index in picks {
            session.reveal(index).unwrap();
        }

        match session.cashout() {
            Ok(settlement) => {
                prop_assert_eq!(session.phase(), Phase::CashedOut);
                for index in later {
                    prop_assert_eq!(session.reveal(index), Ok(RevealOutcome::NoChange));
                }
                prop_assert_eq!(session.profit(), settlement.profit);
                prop_assert_eq!(session.settlement(), Some(settlement));
            }
            Err(error) => {
                prop_assert_eq!(error, GameError::NotActive);
                prop_assert!(session.phase().is_terminal());
            }
        }
    }
}
