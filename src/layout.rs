use crate::configuration::GeneratorConfiguration;
use crate::error::ContextError;
use crate::fonts::StandardFont;

/// A line of text together with the font and the baseline position it has to be drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub font: StandardFont,
    pub font_size: f32,
    /// Position of the start of the baseline, in points from the bottom-left corner of the page.
    pub position: [f32; 2],
}

/// Places the title and then each body line one below the other at fixed steps.
///
/// The title goes at `title_top_offset` from the top edge, the first body line at `body_top_offset`,
/// and every following body line `line_spacing` lower than the previous one. Empty lines are placed
/// like any other, so they consume their share of vertical space. An error is returned if any of the
/// lines would not be strictly below its predecessor or would fall under the bottom margin.
pub fn place_lines(
    configuration: &GeneratorConfiguration,
    title: &str,
    body_lines: &[&str],
) -> Result<Vec<PlacedLine>, ContextError> {
    let x = configuration.left_margin;
    let page_height = configuration.page_height;
    if !configuration.heading_font.is_bold() {
        log::warn!(
            "The heading font {:?} is not a bold typeface",
            configuration.heading_font.base_name()
        );
    }

    let mut placed_lines = Vec::with_capacity(body_lines.len() + 1);
    placed_lines.push(PlacedLine {
        text: title.to_string(),
        font: configuration.heading_font,
        font_size: configuration.heading_font_size,
        position: [x, page_height - configuration.title_top_offset],
    });

    let mut y = page_height - configuration.body_top_offset;
    for body_line in body_lines {
        placed_lines.push(PlacedLine {
            text: body_line.to_string(),
            font: configuration.body_font,
            font_size: configuration.body_font_size,
            position: [x, y],
        });
        y -= configuration.line_spacing;
    }

    check_vertical_order(configuration, &placed_lines)?;

    Ok(placed_lines)
}

fn check_vertical_order(
    configuration: &GeneratorConfiguration,
    placed_lines: &[PlacedLine],
) -> Result<(), ContextError> {
    if configuration.left_margin < 0.0 || configuration.left_margin >= configuration.page_width {
        return Err(ContextError::configuration(format!(
            "The left margin {} lies outside of the page width {}",
            configuration.left_margin, configuration.page_width
        )));
    }

    for (font_role, font_size) in [
        ("heading", configuration.heading_font_size),
        ("body", configuration.body_font_size),
    ] {
        if font_size <= 0.0 || !font_size.is_finite() {
            return Err(ContextError::configuration(format!(
                "The {} font size {} is not a positive number",
                font_role, font_size
            )));
        }
    }

    let mut previous_y = configuration.page_height;
    for (index, placed_line) in placed_lines.iter().enumerate() {
        let [_, y] = placed_line.position;
        if y >= previous_y {
            return Err(ContextError::configuration(format!(
                "Line {} at height {} is not below the previous line at height {}",
                index, y, previous_y
            )));
        }
        if y < configuration.bottom_margin {
            return Err(ContextError::configuration(format!(
                "Line {} at height {} falls below the bottom margin {}",
                index, y, configuration.bottom_margin
            )));
        }
        previous_y = y;
    }

    Ok(())
}
