/// In-memory stand-in for one `.stock-table`: rendered `<tr>` rows plus the
/// visibility of its `.no-data` placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockTable {
    rows: Vec<String>,
    placeholder_visible: bool,
}

impl StockTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn show_placeholder(&mut self, visible: bool) {
        self.placeholder_visible = visible;
    }

    pub fn append_row(&mut self, html: String) {
        self.rows.push(html);
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn is_placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }
}
