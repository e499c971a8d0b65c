use crate::types::{CellState, GenerationResult};

use svg::Document;
use svg::node::element::{Line, Rectangle};

// Cell-state to fill mapping, the contract the transport layers rely on:
//   Empty / ReservedWall -> ground (not drawn, background shows through)
//   Road                 -> GRAVEL
//   BuildingInterior     -> FLOOR
//   BuildingWall         -> TIMBER
const GROUND: &str = "#c9b178";
const GRAVEL: &str = "#8d8273";
const FLOOR: &str = "#e0d4b8";
const TIMBER: &str = "#4c3f31";
const GRID_LINE: &str = "#00000033";

const CELL_PIXELS: u32 = 32;

/// Renders a finalized grid into an SVG document, one filled square per
/// non-ground cell plus a cell-grid overlay.
pub fn render_map(result: &GenerationResult) -> Document {
    let grid = result.grid();
    let canvas_width = grid.width() * CELL_PIXELS;
    let canvas_height = grid.height() * CELL_PIXELS;

    let mut document = Document::new()
        .set("width", canvas_width)
        .set("height", canvas_height);

    document = document.add(
        Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", canvas_width)
            .set("height", canvas_height)
            .set("fill", GROUND),
    );

    for (coord, state) in grid.iter() {
        let fill = match state {
            CellState::Empty | CellState::ReservedWall => continue,
            CellState::Road => GRAVEL,
            CellState::BuildingInterior => FLOOR,
            CellState::BuildingWall => TIMBER,
        };

        document = document.add(
            Rectangle::new()
                .set("x", coord.x * CELL_PIXELS)
                .set("y", coord.y * CELL_PIXELS)
                .set("width", CELL_PIXELS)
                .set("height", CELL_PIXELS)
                .set("fill", fill),
        );
    }

    for x in 0..=grid.width() {
        document = document.add(
            Line::new()
                .set("x1", x * CELL_PIXELS)
                .set("y1", 0)
                .set("x2", x * CELL_PIXELS)
                .set("y2", canvas_height)
                .set("stroke", GRID_LINE)
                .set("stroke-width", 1),
        );
    }

    for y in 0..=grid.height() {
        document = document.add(
            Line::new()
                .set("x1", 0)
                .set("y1", y * CELL_PIXELS)
                .set("x2", canvas_width)
                .set("y2", y * CELL_PIXELS)
                .set("stroke", GRID_LINE)
                .set("stroke-width", 1),
        );
    }

    document
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::session::generate;
    use crate::themes::Theme;
    use crate::types::GenerationRequest;

    #[test]
    fn test_render_covers_the_canvas_and_paints_walls() {
        let request = GenerationRequest {
            width: 16,
            height: 12,
            road_count: 10,
            building_count: 2,
            theme: Theme::Outpost,
            seed: Some(4),
            step_budget: None,
        };

        let result = generate(request).unwrap();
        let rendered = render_map(&result).to_string();

        assert!(rendered.contains(r#"width="512""#));
        assert!(rendered.contains(r#"height="384""#));
        assert!(rendered.contains(GROUND));
        assert!(rendered.contains(TIMBER));
    }
}
