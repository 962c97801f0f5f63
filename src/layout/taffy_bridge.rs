//! Taffy Bridge - natural slide heights.
//!
//! Builds a throwaway Taffy tree with the container as a column flexbox of
//! fixed width and one measured leaf per slide, then reads each slide's
//! resolved height. Used by the headless host to answer `client_height`.

use std::collections::HashMap;

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection, NodeId, Size, Style,
    TaffyTree,
};
use tracing::warn;

use super::text_measure::{measure_text_height, string_width};

/// One slide to measure: an opaque id and its text content.
#[derive(Debug, Clone, Copy)]
pub struct MeasureItem<'a> {
    pub id: usize,
    pub text: &'a str,
}

/// Measure function for slide text: rows times `line_height`.
fn measure_slide(
    text: &str,
    line_height: f32,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    if text.is_empty() {
        return Size::ZERO;
    }

    let avail_width = match available_space.width {
        AvailableSpace::Definite(w) => w.max(1.0) as u16,
        AvailableSpace::MinContent => string_width(text),
        AvailableSpace::MaxContent => u16::MAX,
    };
    let wrap_width = known_dimensions.width.map_or(avail_width, |w| w.max(1.0) as u16);
    let rows = measure_text_height(text, wrap_width);

    Size {
        width: known_dimensions.width.unwrap_or(string_width(text) as f32),
        height: known_dimensions.height.unwrap_or(rows as f32 * line_height),
    }
}

/// Compute the natural height of every item inside a container `width`
/// columns wide.
///
/// Returns a map from item id to height. Items Taffy failed to lay out are
/// missing from the map.
pub fn measure_slide_heights(
    items: &[MeasureItem<'_>],
    width: u16,
    line_height: f32,
) -> HashMap<usize, f32> {
    let mut heights = HashMap::new();
    if items.is_empty() {
        return heights;
    }

    let mut tree: TaffyTree<usize> = TaffyTree::new();
    let mut leaves: Vec<(usize, NodeId)> = Vec::with_capacity(items.len());

    for (position, item) in items.iter().enumerate() {
        let style = Style {
            display: Display::Block,
            size: Size {
                width: TaffyDimension::Percent(1.0),
                height: TaffyDimension::Auto,
            },
            flex_shrink: 0.0,
            ..Default::default()
        };
        match tree.new_leaf_with_context(style, position) {
            Ok(node) => leaves.push((item.id, node)),
            Err(err) => warn!(id = item.id, error = %err, "failed to create slide measure node"),
        }
    }

    let container_style = Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        size: Size {
            width: TaffyDimension::Length(width as f32),
            height: TaffyDimension::Auto,
        },
        ..Default::default()
    };
    let children: Vec<NodeId> = leaves.iter().map(|&(_, node)| node).collect();
    let root = match tree.new_with_children(container_style, &children) {
        Ok(root) => root,
        Err(err) => {
            warn!(error = %err, "failed to create container measure node");
            return heights;
        }
    };

    let available = Size {
        width: AvailableSpace::Definite(width as f32),
        height: AvailableSpace::MaxContent,
    };

    let mut measure_fn = |known_dimensions: Size<Option<f32>>,
                          available_space: Size<AvailableSpace>,
                          _node_id: NodeId,
                          context: Option<&mut usize>,
                          _style: &Style| {
        match context {
            Some(&mut position) => measure_slide(
                items[position].text,
                line_height,
                known_dimensions,
                available_space,
            ),
            None => Size::ZERO,
        }
    };

    if let Err(err) = tree.compute_layout_with_measure(root, available, &mut measure_fn) {
        warn!(error = %err, "slide height layout failed");
        return heights;
    }

    for (id, node) in leaves {
        if let Ok(layout) = tree.layout(node) {
            heights.insert(id, layout.size.height);
        }
    }

    heights
}
