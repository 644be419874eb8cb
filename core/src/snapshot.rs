use serde::{Deserialize, Serialize};

use crate::*;

/// What a presentation layer may see of the session. Covered mines never appear here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub side: Coord,
    pub revealed: Vec<CellIndex>,
    pub multiplier: f64,
    pub profit: f64,
    pub bet: Option<f64>,
    pub mine_target: CellCount,
}

impl SessionSnapshot {
    pub fn from_session(session: &GameSession, layout: &MineLayout) -> Self {
        let config = session.config().unwrap_or_else(|| layout.config());
        let phase = match session.phase() {
            Phase::Idle if layout.is_ready() => Phase::AwaitingBet,
            phase => phase,
        };

        Self {
            phase,
            side: config.side,
            revealed: session.revealed().to_vec(),
            multiplier: session.multiplier(),
            profit: session.profit(),
            bet: session.bet().map(Bet::amount),
            mine_target: config.mines,
        }
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.side, self.side)
    }

    pub fn gems(&self) -> CellCount {
        self.total_cells() - self.mine_target
    }

    /// A revealed cell is the mine only when it was the last reveal of a lost round.
    pub fn cell_view(&self, index: CellIndex) -> CellView {
        match self.revealed.iter().position(|&revealed| revealed == index) {
            None => CellView::Covered,
            Some(pos) if self.phase == Phase::Lost && pos + 1 == self.revealed.len() => {
                CellView::Mine
            }
            Some(_) => CellView::Diamond,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Mine editor view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub side: Coord,
    pub placed: CellCount,
    pub target: CellCount,
    pub gems: CellCount,
    pub mines: Vec<CellIndex>,
    pub editable: bool,
}

impl LayoutSnapshot {
    pub fn from_layout(layout: &MineLayout, editable: bool) -> Self {
        Self {
            side: layout.side(),
            placed: layout.placed(),
            target: layout.target(),
            gems: layout.gems(),
            mines: layout.mine_indices().collect(),
            editable,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.placed == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(mines: &[CellIndex]) -> MineLayout {
        MineLayout::from_mine_indices(5, mines).unwrap()
    }

    #[test]
    fn idle_with_ready_layout_awaits_bet() {
        let session = GameSession::default();

        let ready = SessionSnapshot::from_session(&session, &layout(&[3]));
        assert_eq!(ready.phase, Phase::AwaitingBet);

        let empty = SessionSnapshot::from_session(&session, &MineLayout::default());
        assert_eq!(empty.phase, Phase::Idle);
    }

    #[test]
    fn lost_round_shows_only_the_triggered_mine() {
        let layout = layout(&[0, 1]);
        let mut session = GameSession::default();
        session.start_round(&layout, 10.0).unwrap();
        session.reveal(2).unwrap();
        session.reveal(1).unwrap();

        let snapshot = SessionSnapshot::from_session(&session, &layout);
        assert_eq!(snapshot.cell_view(2), CellView::Diamond);
        assert_eq!(snapshot.cell_view(1), CellView::Mine);
        assert_eq!(snapshot.cell_view(0), CellView::Covered);
        assert_eq!(snapshot.gems(), 23);
    }

    #[test]
    fn json_never_lists_covered_mines() {
        let layout = layout(&[7]);
        let mut session = GameSession::default();
        session.start_round(&layout, 1.0).unwrap();
        session.reveal(3).unwrap();

        let json = SessionSnapshot::from_session(&session, &layout)
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["revealed"], serde_json::json!([3]));
        assert_eq!(value["phase"], "Active");
        assert!(value.get("mines").is_none());
    }

    #[test]
    fn layout_snapshot_counts() {
        let snapshot = LayoutSnapshot::from_layout(&layout(&[2, 9]), true);

        assert_eq!(snapshot.placed, 2);
        assert_eq!(snapshot.gems, 23);
        assert_eq!(snapshot.mines, vec![2, 9]);
        assert!(snapshot.is_ready());
    }
}
