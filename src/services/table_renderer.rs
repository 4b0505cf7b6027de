use crate::api::base::DashboardApi;
use crate::errors::Result;
use crate::models::stock::{StockRow, SystemSnapshot, TurtleSystem};
use crate::util::{self, escape_html, format_price};
use crate::view::table::StockTable;
use crate::view::{labels, DashboardView, TriggerGuard};
use log::{error, info};
use std::sync::Arc;

/// 刷新并重新渲染两张表格
pub struct TableRenderer {
    api: Arc<dyn DashboardApi + Send + Sync>,
}

impl TableRenderer {
    pub fn new(api: Arc<dyn DashboardApi + Send + Sync>) -> Self {
        Self { api }
    }

    /// 手动或定时刷新。失败时提示用户，按钮在任何情况下都会恢复。
    pub async fn refresh_and_render(&self, view: &mut dyn DashboardView) -> Result<()> {
        let mut control = TriggerGuard::engage(view, labels::REFRESHING);

        let result = self.refresh_inner(&mut *control).await;
        if let Err(e) = &result {
            error!("Refresh failed: {}", e);
            control.notify(&e.user_message());
        }
        result
    }

    async fn refresh_inner(&self, view: &mut dyn DashboardView) -> Result<()> {
        self.api.refresh().await?.ensure_success()?;
        self.reload(view).await
    }

    /// 拉取最新快照并渲染，不触发服务端刷新
    pub async fn reload(&self, view: &mut dyn DashboardView) -> Result<()> {
        let data = self.api.turtle_data().await?;
        render_snapshot(view, &data.snapshot);
        view.set_last_updated(util::last_updated_label(chrono::Local::now().naive_local()));
        info!(
            "Rendered {} system1 and {} system2 rows",
            data.snapshot.system1.as_ref().map_or(0, |r| r.len()),
            data.snapshot.system2.as_ref().map_or(0, |r| r.len())
        );
        Ok(())
    }
}

pub fn render_snapshot(view: &mut dyn DashboardView, snapshot: &SystemSnapshot) {
    for system in TurtleSystem::ALL {
        render(view.table_mut(system), snapshot.rows(system));
    }
}

/// Replace the table body with one row per entry, or show the placeholder.
pub fn render(table: &mut StockTable, rows: Option<&[StockRow]>) {
    table.clear();

    let rows = match rows {
        Some(rows) if !rows.is_empty() => rows,
        _ => {
            table.show_placeholder(true);
            return;
        }
    };

    table.show_placeholder(false);
    for row in rows {
        table.append_row(render_row(row));
    }
}

pub fn render_row(row: &StockRow) -> String {
    format!(
        "<tr>\
<td class=\"stock-code\">{}</td>\
<td class=\"stock-name\">{}</td>\
<td class=\"date\">{}</td>\
<td class=\"price entry-price\">{}</td>\
<td class=\"price\">{}</td>\
<td class=\"price stop-loss\">{}</td>\
<td class=\"price trailing-stop\">{}</td>\
<td class=\"price add-position\">{}</td>\
</tr>",
        escape_html(&row.code),
        escape_html(&row.name),
        escape_html(
            row.entry_date
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(util::MISSING)
        ),
        format_price(row.entry_price, true),
        format_price(row.current, false),
        format_price(row.stop_loss, true),
        format_price(row.trailing_stop, true),
        format_price(row.add_position, true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str) -> StockRow {
        StockRow {
            code: code.to_string(),
            name: "삼성전자".to_string(),
            entry_date: Some("2025-05-02".to_string()),
            entry_price: Some(71249.6),
            current: Some(71800.5),
            stop_loss: Some(68450.2),
            trailing_stop: None,
            add_position: Some(1234567.0),
        }
    }

    #[test]
    fn empty_or_absent_rows_show_placeholder() {
        let mut table = StockTable::new();
        table.append_row("<tr>stale</tr>".to_string());

        let empty: Vec<StockRow> = Vec::new();
        render(&mut table, Some(empty.as_slice()));
        assert!(table.is_placeholder_visible());
        assert!(table.rows().is_empty());

        table.append_row("<tr>stale</tr>".to_string());
        render(&mut table, None);
        assert!(table.is_placeholder_visible());
        assert!(table.rows().is_empty());
    }

    #[test]
    fn one_row_per_entry_in_order() {
        let mut table = StockTable::new();
        table.show_placeholder(true);
        let rows = vec![row("000660"), row("005930"), row("035420")];

        render(&mut table, Some(rows.as_slice()));

        assert!(!table.is_placeholder_visible());
        assert_eq!(table.rows().len(), 3);
        assert!(table.rows()[0].contains(">000660<"));
        assert!(table.rows()[1].contains(">005930<"));
        assert!(table.rows()[2].contains(">035420<"));
    }

    #[test]
    fn formats_prices() {
        let html = render_row(&row("005930"));
        assert!(html.contains("<td class=\"price entry-price\">71,250</td>"));
        assert!(html.contains("<td class=\"price\">71,800.5</td>"));
        assert!(html.contains("<td class=\"price stop-loss\">68,450</td>"));
        assert!(html.contains("<td class=\"price trailing-stop\">-</td>"));
        assert!(html.contains("<td class=\"price add-position\">1,234,567</td>"));
    }

    #[test]
    fn text_fields_are_escaped() {
        let mut evil = row("<script>");
        evil.name = "A&B \"Corp\"".to_string();
        evil.entry_date = None;

        let html = render_row(&evil);
        assert!(html.contains("<td class=\"stock-code\">&lt;script&gt;</td>"));
        assert!(html.contains("<td class=\"stock-name\">A&amp;B &quot;Corp&quot;</td>"));
        assert!(html.contains("<td class=\"date\">-</td>"));
        assert!(!html.contains("<script>"));
    }
}
