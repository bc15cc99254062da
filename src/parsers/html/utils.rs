/// ASCII 空白字符
pub const WHITESPACES: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];

/// HTML 转义
///
/// 转义 `&`、`<`、`>`、`"` 和 `'`，`&` 最先处理，因此对同一字符串
/// 调用两次会得到两层转义。
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// 去掉首尾 ASCII 空白
pub fn trim_whitespace(s: &str) -> &str {
    s.trim_matches(WHITESPACES)
}
