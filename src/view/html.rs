use crate::errors::Result;
use crate::models::stock::TurtleSystem;
use crate::util::escape_html;
use crate::view::table::StockTable;
use crate::view::{labels, DashboardView, TriggerState};
use log::info;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

const COLUMNS: [&str; 8] = [
    "Code",
    "Name",
    "Entry date",
    "Entry price",
    "Current",
    "Stop loss",
    "Trailing stop",
    "Add position",
];

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ddd;padding:.4rem .6rem}\
td.price{text-align:right}\
.stop-loss{color:#c0392b}.add-position{color:#27ae60}\
.notice{background:#fdecea;padding:.5rem;margin:.5rem 0}";

/// 看板页面：持有两张表格、按钮状态和提示信息，可序列化为完整的 HTML 文档
pub struct HtmlPage {
    output_path: Option<PathBuf>,
    trigger: TriggerState,
    system1: StockTable,
    system2: StockTable,
    last_updated: Option<String>,
    notices: Vec<String>,
    reload_requested: bool,
}

impl HtmlPage {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self {
            output_path,
            trigger: TriggerState::idle(labels::REFRESH_IDLE),
            system1: StockTable::new(),
            system2: StockTable::new(),
            last_updated: None,
            notices: Vec::new(),
            reload_requested: false,
        }
    }

    pub fn table(&self, system: TurtleSystem) -> &StockTable {
        match system {
            TurtleSystem::System1 => &self.system1,
            TurtleSystem::System2 => &self.system2,
        }
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn clear_notices(&mut self) {
        self.notices.clear();
    }

    /// 取出并清除重新加载请求
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>Turtle Dashboard</title>\n");
        let _ = writeln!(html, "<style>{}</style>\n</head>\n<body>", STYLE);

        html.push_str("<header>\n<h1>Turtle Trading Dashboard</h1>\n");
        let _ = writeln!(
            html,
            "<button class=\"refresh-btn\"{}>{}</button>",
            if self.trigger.disabled { " disabled" } else { "" },
            escape_html(&self.trigger.label)
        );
        let _ = writeln!(
            html,
            "<span class=\"last-updated\">{}</span>\n</header>",
            escape_html(self.last_updated.as_deref().unwrap_or(""))
        );

        for notice in &self.notices {
            let _ = writeln!(html, "<div class=\"notice\" role=\"alert\">{}</div>", escape_html(notice));
        }

        for system in TurtleSystem::ALL {
            self.write_section(&mut html, system);
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn write_section(&self, html: &mut String, system: TurtleSystem) {
        let table = self.table(system);
        let _ = writeln!(html, "<section class=\"{}\">", system.css_class());
        let _ = writeln!(html, "<h2>{}</h2>", escape_html(system.title()));
        html.push_str("<div class=\"stock-table\">\n<table>\n<thead><tr>");
        for column in COLUMNS {
            let _ = write!(html, "<th>{}</th>", column);
        }
        html.push_str("</tr></thead>\n<tbody>\n");
        for row in table.rows() {
            html.push_str(row);
            html.push('\n');
        }
        html.push_str("</tbody>\n</table>\n");
        let _ = writeln!(
            html,
            "<div class=\"no-data\" style=\"display:{}\">No signals</div>",
            if table.is_placeholder_visible() { "block" } else { "none" }
        );
        html.push_str("</div>\n</section>\n");
    }

    /// 写出到输出文件；未配置路径时不做任何事
    pub fn save(&self) -> Result<()> {
        if let Some(path) = &self.output_path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, self.to_html())?;
            info!("Dashboard written to {}", path.display());
        }
        Ok(())
    }
}

impl DashboardView for HtmlPage {
    fn trigger(&self) -> TriggerState {
        self.trigger.clone()
    }

    fn set_trigger(&mut self, state: TriggerState) {
        self.trigger = state;
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn table_mut(&mut self, system: TurtleSystem) -> &mut StockTable {
        match system {
            TurtleSystem::System1 => &mut self.system1,
            TurtleSystem::System2 => &mut self.system2,
        }
    }

    fn set_last_updated(&mut self, label: String) {
        self.last_updated = Some(label);
    }

    fn request_reload(&mut self) {
        self.reload_requested = true;
    }
}
