use placeholdr_protocol::{
    Point, Rect, RenderCommand, TextAlign, TextBaseline, TextShadow, ThemeToken,
};

use crate::dimensions::Dimensions;

pub const GRID_SPACING: u32 = 20;
pub const GRID_LINE_WIDTH: f64 = 1.0;
pub const MAX_LABEL_FONT_SIZE: f64 = 32.0;
pub const LABEL_SHADOW_BLUR: f64 = 4.0;

/// Build the placeholder scene: gradient background, grid overlay and the
/// centered dimension label, in paint order.
///
/// Colors are theme tokens, so the same scene serves both palettes.
pub fn build_placeholder(dimensions: Dimensions) -> Vec<RenderCommand> {
    let width = f64::from(dimensions.width());
    let height = f64::from(dimensions.height());
    let columns = dimensions.width() / GRID_SPACING + 1;
    let rows = dimensions.height() / GRID_SPACING + 1;
    let mut commands = Vec::with_capacity((columns + rows) as usize + 2);

    commands.push(RenderCommand::FillLinearGradient {
        rect: Rect::new(0.0, 0.0, width, height),
        from: Point::new(0.0, 0.0),
        to: Point::new(width, height),
        start: ThemeToken::GradientStart,
        end: ThemeToken::GradientEnd,
    });

    // Vertical lines, then horizontal; the last partial cell is clipped.
    for x in grid_positions(dimensions.width()) {
        let x = f64::from(x);
        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, 0.0),
            to: Point::new(x, height),
            color: ThemeToken::GridLine,
            width: GRID_LINE_WIDTH,
        });
    }
    for y in grid_positions(dimensions.height()) {
        let y = f64::from(y);
        commands.push(RenderCommand::DrawLine {
            from: Point::new(0.0, y),
            to: Point::new(width, y),
            color: ThemeToken::GridLine,
            width: GRID_LINE_WIDTH,
        });
    }

    commands.push(RenderCommand::DrawText {
        position: Point::new(width / 2.0, height / 2.0),
        text: label_text(dimensions),
        color: ThemeToken::LabelText,
        font_size: label_font_size(dimensions),
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
        shadow: Some(TextShadow {
            color: ThemeToken::LabelShadow,
            blur: LABEL_SHADOW_BLUR,
        }),
    });

    commands
}

/// `"800 × 600"`.
pub fn label_text(dimensions: Dimensions) -> String {
    format!("{} × {}", dimensions.width(), dimensions.height())
}

/// One tenth of the shorter side, capped at 32 px.
pub fn label_font_size(dimensions: Dimensions) -> f64 {
    let w = f64::from(dimensions.width()) / 10.0;
    let h = f64::from(dimensions.height()) / 10.0;
    w.min(h).min(MAX_LABEL_FONT_SIZE)
}

/// Grid line coordinates `0, 20, 40, …` up to and including `extent`.
fn grid_positions(extent: u32) -> impl Iterator<Item = u32> {
    (0..=extent).step_by(GRID_SPACING as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: u32, h: u32) -> Dimensions {
        Dimensions::new(w, h).expect("valid dimensions")
    }

    fn lines(cmds: &[RenderCommand]) -> Vec<(Point, Point)> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawLine { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn paints_background_grid_then_label() {
        let cmds = build_placeholder(dims(400, 300));
        assert!(matches!(
            cmds.first(),
            Some(RenderCommand::FillLinearGradient { .. })
        ));
        assert!(matches!(cmds.last(), Some(RenderCommand::DrawText { .. })));
        // 0..=400 step 20 -> 21 columns, 0..=300 step 20 -> 16 rows
        assert_eq!(lines(&cmds).len(), 21 + 16);
    }

    #[test]
    fn grid_spacing_is_fixed_and_edge_cell_is_clipped() {
        let cmds = build_placeholder(dims(50, 45));
        let verticals: Vec<f64> = lines(&cmds)
            .iter()
            .filter(|(from, to)| from.x == to.x)
            .map(|(from, _)| from.x)
            .collect();
        assert_eq!(verticals, vec![0.0, 20.0, 40.0]);
        let horizontals: Vec<f64> = lines(&cmds)
            .iter()
            .filter(|(from, to)| from.y == to.y)
            .map(|(from, to)| {
                assert_eq!(to.x, 50.0, "horizontal lines span the full width");
                from.y
            })
            .collect();
        assert_eq!(horizontals, vec![0.0, 20.0, 40.0]);
    }

    #[test]
    fn label_is_centered_with_times_sign() {
        let cmds = build_placeholder(dims(800, 600));
        let Some(RenderCommand::DrawText {
            position,
            text,
            align,
            baseline,
            shadow,
            font_size,
            ..
        }) = cmds.last()
        else {
            panic!("label missing");
        };
        assert_eq!(text, "800 × 600");
        assert_eq!(*position, Point::new(400.0, 300.0));
        assert_eq!(*align, TextAlign::Center);
        assert_eq!(*baseline, TextBaseline::Middle);
        assert_eq!(*font_size, 32.0);
        assert_eq!(shadow.map(|s| s.blur), Some(4.0));
    }

    #[test]
    fn font_size_tracks_shorter_side() {
        assert_eq!(label_font_size(dims(100, 2000)), 10.0);
        assert_eq!(label_font_size(dims(3000, 150)), 15.0);
        assert_eq!(label_font_size(dims(3000, 2000)), 32.0);
        assert_eq!(label_font_size(dims(1, 1)), 0.1);
    }

    #[test]
    fn scene_is_deterministic() {
        assert_eq!(
            build_placeholder(dims(123, 77)),
            build_placeholder(dims(123, 77))
        );
    }
}
