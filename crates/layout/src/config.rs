use mathtab_types::RgbColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Color of every rule the formatter draws (row and column lines and
    /// the frame).
    ///
    /// Defaults to black.
    pub rule_color: RgbColor,

    /// The number of distinct rule areas the formatter keeps before its
    /// rule cache is pruned.
    ///
    /// - **Higher values**: tables with many differently sized cells still
    ///   share their rules, at the cost of memory.
    /// - **Lower values**: less memory, more rule areas built per table.
    ///
    /// Defaults to `256`.
    pub rule_cache_capacity: usize,

    /// Draw the frame rules when the table's frame is not `none`. The frame
    /// spacing is reserved either way.
    ///
    /// Defaults to `true`.
    pub draw_frame: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rule_color: RgbColor::BLACK,
            rule_cache_capacity: 256,
            draw_frame: true,
        }
    }
}
