use std::fmt::Write;

use gemsweeper_core::*;

/// Play grid with the status line underneath.
pub(crate) fn board(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    for index in 0..snapshot.total_cells() {
        let glyph = match snapshot.cell_view(index) {
            CellView::Covered => format!("{index:>3}"),
            CellView::Diamond => "  ◆".to_owned(),
            CellView::Mine => "  ✸".to_owned(),
        };
        out.push_str(&glyph);
        if (index + 1) % CellIndex::from(snapshot.side) == 0 {
            out.push('\n');
        }
    }

    let _ = write!(
        out,
        "{:?} | mines {} gems {} | total profit ({:.2}x) {:.2}",
        snapshot.phase,
        snapshot.mine_target,
        snapshot.gems(),
        snapshot.multiplier,
        snapshot.profit
    );
    if let Some(bet) = snapshot.bet {
        let _ = write!(out, " | bet {bet:.2}");
    }
    out
}

/// Mine editor grid.
pub(crate) fn layout(snapshot: &LayoutSnapshot) -> String {
    let mut out = String::new();
    let total = CellIndex::from(snapshot.side) * CellIndex::from(snapshot.side);
    for index in 0..total {
        out.push_str(if snapshot.mines.contains(&index) {
            " x"
        } else {
            " ."
        });
        if (index + 1) % CellIndex::from(snapshot.side) == 0 {
            out.push('\n');
        }
    }
    let _ = write!(
        out,
        "Placed mines: {} / {}{}",
        snapshot.placed,
        snapshot.target,
        if snapshot.editable { "" } else { " (locked)" }
    );
    out
}
