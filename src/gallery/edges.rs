use super::layout::LayoutResult;

/// Right and down neighbor pairs of the occupied grid cells.
///
/// Pairs are `(index, neighbor)` with `index < neighbor`. Only the first
/// `node_count` cells are visited, so a ragged last row only links what exists
/// and oversized fixed grids cost nothing extra.
pub(super) fn build_edges(layout: &LayoutResult, node_count: usize) -> Vec<(usize, usize)> {
    let (columns, rows) = (layout.columns, layout.rows);
    if columns == 0 || rows == 0 {
        return Vec::new();
    }

    let mut edges = Vec::with_capacity(node_count.saturating_mul(2));
    for index in 0..node_count {
        let (column, row) = layout.cell(index);

        if column + 1 < columns && index + 1 < node_count {
            edges.push((index, index + 1));
        }

        if row + 1 < rows
            && let Some(down) = index.checked_add(columns)
            && down < node_count
        {
            edges.push((index, down));
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(columns: usize, rows: usize) -> LayoutResult {
        LayoutResult {
            columns,
            rows,
            scale: 1.0,
            step_x: 10.0,
            step_y: 10.0,
            origin_x: 0.0,
            origin_y: 0.0,
            item_width: 8.0,
            item_height: 8.0,
        }
    }

    #[test]
    fn full_three_by_three_has_twelve_edges() {
        let layout = grid(3, 3);
        let edges = build_edges(&layout, 9);
        assert_eq!(edges.len(), 12);

        for &(a, b) in &edges {
            let (ca, ra) = layout.cell(a);
            let (cb, rb) = layout.cell(b);
            let manhattan = ca.abs_diff(cb) + ra.abs_diff(rb);
            assert_eq!(manhattan, 1, "edge {a}-{b} is not grid-adjacent");
        }

        let horizontal = edges.iter().filter(|(a, b)| b - a == 1).count();
        assert_eq!(horizontal, 6);
    }

    #[test]
    fn ragged_last_row_only_links_existing_cells() {
        // 3 columns, 7 nodes: last row holds a single node at index 6
        let edges = build_edges(&grid(3, 3), 7);
        assert!(edges.contains(&(3, 6)));
        assert!(!edges.iter().any(|&(a, b)| a >= 7 || b >= 7));
        assert!(!edges.contains(&(4, 7)));
        assert_eq!(edges.len(), 4 + 4);
    }

    #[test]
    fn row_wrap_is_not_an_edge() {
        let edges = build_edges(&grid(3, 2), 6);
        assert!(!edges.contains(&(2, 3)));
    }

    #[test]
    fn oversized_fixed_grid_only_walks_existing_nodes() {
        let tall = build_edges(&grid(4, usize::MAX / 2), 10);
        assert_eq!(tall.len(), 3 * 2 + 1 + 6);

        let wide = build_edges(&grid(usize::MAX, usize::MAX), 5);
        assert_eq!(wide, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn empty_grid_has_no_edges() {
        assert!(build_edges(&grid(0, 0), 0).is_empty());
        assert!(build_edges(&grid(4, 4), 0).is_empty());
    }
}
