use std::cell::RefCell;
use std::rc::Rc;

use plotters::style::RGBColor;

use crate::engine::{Chart, ChartUpdate, LegendItem, UpdatePlugin};

/// Viewports narrower than this flip the legend into the grid layout.
pub const NARROW_VIEWPORT_PX: u32 = 480;

/// How the rebuilt legend lays its entries out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LegendLayout {
    /// One flexible row, wrapping as needed.
    #[default]
    WideRow,
    /// Fixed two-column grid for narrow viewports.
    NarrowGrid,
}

/// The one place layout is decided, keyed only on the narrow flag.
pub fn layout_policy(narrow: bool) -> LegendLayout {
    if narrow {
        LegendLayout::NarrowGrid
    } else {
        LegendLayout::WideRow
    }
}

pub fn narrow_viewport(width_px: u32) -> bool {
    width_px < NARROW_VIEWPORT_PX
}

/// One clickable legend entry, mirroring the engine snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub text: String,
    pub fill_color: RGBColor,
    pub stroke_color: RGBColor,
    /// Hidden entries render with strikethrough text.
    pub hidden: bool,
    pub dataset_index: usize,
}

/// The rebuilt legend: layout choice plus the filtered entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendView {
    pub layout: LegendLayout,
    pub entries: Vec<LegendEntry>,
}

/// Rebuild the whole view from the engine snapshot. No diffing: the previous
/// view is discarded wholesale, so stale entries cannot survive an update.
///
/// Series with an empty label never appear, whatever their hidden flag.
/// Zero items produce an empty view. The layout is re-decided on every
/// rebuild, so a viewport change shows up on the next update.
pub fn rebuild(items: &[LegendItem], viewport_width_px: u32) -> LegendView {
    let entries = items
        .iter()
        .filter(|item| !item.text.is_empty())
        .map(|item| LegendEntry {
            text: item.text.clone(),
            fill_color: item.fill_color,
            stroke_color: item.stroke_color,
            hidden: item.hidden,
            dataset_index: item.dataset_index,
        })
        .collect();
    LegendView {
        layout: layout_policy(narrow_viewport(viewport_width_px)),
        entries,
    }
}

/// Update plugin that keeps a shared [`LegendView`] in sync with the chart.
///
/// The view is shared through `Rc<RefCell<_>>`: the chart host and its
/// observers live on one thread (the UI thread), so no locking is involved.
pub struct LegendPlugin {
    view: Rc<RefCell<LegendView>>,
}

impl LegendPlugin {
    pub fn new(view: Rc<RefCell<LegendView>>) -> Self {
        Self { view }
    }
}

impl UpdatePlugin for LegendPlugin {
    fn after_update(&mut self, update: &ChartUpdate<'_>) {
        *self.view.borrow_mut() = rebuild(update.legend_items, update.viewport_width_px);
    }
}

/// Fresh view handle to wire a [`LegendPlugin`] and its reader to.
pub fn shared_view() -> Rc<RefCell<LegendView>> {
    Rc::new(RefCell::new(LegendView::default()))
}

/// Click transition for one legend entry: flip that dataset's visibility and
/// run an update so every plugin rebuilds against the new state.
pub fn toggle_entry(chart: &mut Chart, dataset_index: usize) {
    let visible = chart.is_dataset_visible(dataset_index);
    chart.set_dataset_visibility(dataset_index, !visible);
    chart.update();
}
