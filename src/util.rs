use chrono::NaiveDateTime;

/// Placeholder shown for missing values
pub const MISSING: &str = "-";

// 与浏览器 toLocaleString() 一致：最多保留三位小数
const MAX_FRACTION_DIGITS: usize = 3;

/// 千分位分组，不取整
pub fn format_grouped(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// 四舍五入后分组（.5 向正无穷方向取整）
pub fn format_rounded(value: f64) -> String {
    format_grouped((value + 0.5).floor())
}

pub fn format_price(value: Option<f64>, rounded: bool) -> String {
    match value {
        Some(v) if rounded => format_rounded(v),
        Some(v) => format_grouped(v),
        None => MISSING.to_string(),
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 转义 HTML 特殊字符，防止注入
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn last_updated_label(now: NaiveDateTime) -> String {
    format!("Last updated: {}", now.format("%Y-%m-%d %H:%M:%S"))
}
