//! Rich-text content rendering with syntax highlighting
//!
//! The CMS editor emits well-formed, lower-case HTML. The renderer expands it
//! into styled markup by ordered pattern substitution: fenced code blocks are
//! extracted, entity-decoded, highlighted and wrapped in a decorative shell;
//! structural tags gain a fixed presentational class set; tables are wrapped
//! in a scrollable container. There is deliberately no HTML parser here; the
//! input is trusted, structurally-constrained editor output. Code block
//! interiors are still re-escaped so a violated trust assumption cannot turn
//! into a second-order injection.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

lazy_static! {
    static ref FENCED_CODE: Regex =
        Regex::new(r#"(?s)<pre><code class="language-(\w+)">(.*?)</code></pre>"#).unwrap();
    static ref BARE_CODE: Regex = Regex::new(r"(?s)<pre><code>(.*?)</code></pre>").unwrap();
    static ref TABLE_OPEN: Regex = Regex::new(r"<table([^>]*)>").unwrap();
    static ref CLASS_ATTR: Regex = Regex::new(r#"class="([^"]*)""#).unwrap();
}

/// Class set injected into structural tags, in application order.
///
/// Prefix matches (`<a `, `<img `) keep whatever attributes the editor wrote;
/// nothing already present is removed.
const TAG_CLASSES: &[(&str, &str)] = &[
    (
        "<h1",
        r#"<h1 class="text-3xl md:text-4xl font-bold text-slate-900 dark:text-slate-100 mt-8 mb-4 leading-tight""#,
    ),
    (
        "<h2",
        r#"<h2 class="text-2xl md:text-3xl font-bold text-slate-900 dark:text-slate-100 mt-8 mb-4 leading-tight""#,
    ),
    (
        "<h3",
        r#"<h3 class="text-xl md:text-2xl font-bold text-slate-900 dark:text-slate-100 mt-6 mb-3 leading-tight""#,
    ),
    (
        "<h4",
        r#"<h4 class="text-lg font-semibold text-slate-900 dark:text-slate-100 mt-5 mb-3""#,
    ),
    (
        "<h5",
        r#"<h5 class="text-base font-semibold text-slate-900 dark:text-slate-100 mt-4 mb-2""#,
    ),
    (
        "<h6",
        r#"<h6 class="text-sm font-semibold text-slate-900 dark:text-slate-100 mt-3 mb-2""#,
    ),
    (
        "<p>",
        r#"<p class="text-lg md:text-xl font-medium text-slate-700 dark:text-slate-300 leading-relaxed mb-6">"#,
    ),
    (
        "<a ",
        r#"<a class="text-[hsl(var(--primary))] hover:text-[hsl(var(--primary))]/80 underline transition-colors" "#,
    ),
    (
        "<ul>",
        r#"<ul class="list-disc pl-6 mb-6 space-y-3 text-lg md:text-xl text-slate-700 dark:text-slate-300">"#,
    ),
    (
        "<ol>",
        r#"<ol class="list-decimal pl-6 mb-6 space-y-3 text-lg md:text-xl text-slate-700 dark:text-slate-300">"#,
    ),
    ("<li>", r#"<li class="mb-2">"#),
    (
        "<blockquote>",
        r#"<blockquote class="border-l-4 border-[#13AECE] pl-6 py-4 my-8 text-lg md:text-xl text-slate-700 dark:text-slate-300 italic bg-slate-50 dark:bg-slate-800/40 rounded-r-lg">"#,
    ),
    (
        "<code>",
        r#"<code class="bg-slate-100 dark:bg-slate-800/80 px-2 py-1 rounded text-[#13AECE] text-sm font-mono">"#,
    ),
    ("<em>", r#"<em class="italic text-slate-700 dark:text-slate-300">"#),
    (
        "<strong>",
        r#"<strong class="font-bold text-slate-900 dark:text-slate-100">"#,
    ),
    ("<img ", r#"<img class="w-full rounded-lg shadow-lg my-6" "#),
];

/// Marker class placed on wrapped tables; its presence makes the table pass a
/// no-op on re-processed output.
const TABLE_MARKER: &str = "article-table";

const TABLE_WRAPPER_OPEN: &str = r#"<div class="article-table-wrapper overflow-x-auto my-8 rounded-2xl border border-slate-200 dark:border-slate-700 bg-white dark:bg-slate-800 shadow-xl">"#;

/// Rich-text HTML renderer with syntax highlighting
pub struct ContentRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl ContentRenderer {
    /// Create a renderer with the default highlight theme
    pub fn new() -> Self {
        Self::with_theme("base16-ocean.dark")
    }

    /// Create a renderer with a specific highlight theme
    pub fn with_theme(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Expand raw rich-text HTML into styled markup.
    ///
    /// Deterministic and total: any input string produces output, including
    /// empty, plain-text, and malformed/partial HTML. A highlighter failure
    /// degrades to escaped plain text.
    pub fn render(&self, html: &str) -> String {
        let html = self.render_fenced_blocks(html);
        let html = self.render_bare_blocks(&html);
        let html = apply_tag_classes(&html);
        wrap_tables(&html)
    }

    /// Pass 1: fenced blocks carrying a language class
    fn render_fenced_blocks(&self, html: &str) -> String {
        FENCED_CODE
            .replace_all(html, |caps: &Captures| {
                let lang = &caps[1];
                let code = entity_decode(&caps[2]);
                let body = self.highlight(&code, Some(lang));
                code_shell(lang, &body)
            })
            .into_owned()
    }

    /// Pass 2: language-less blocks, labelled "code", best-effort detection
    fn render_bare_blocks(&self, html: &str) -> String {
        BARE_CODE
            .replace_all(html, |caps: &Captures| {
                let code = entity_decode(&caps[1]);
                let body = self.highlight(&code, None);
                code_shell("code", &body)
            })
            .into_owned()
    }

    /// Highlight a code block, falling back to escaped text on any failure
    fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let syntax = lang
            .and_then(|token| {
                self.syntax_set
                    .find_syntax_by_token(token)
                    .or_else(|| self.syntax_set.find_syntax_by_extension(token))
            })
            .or_else(|| {
                self.syntax_set
                    .find_syntax_by_first_line(code.lines().next().unwrap_or(""))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let Some(theme) = theme else {
            return html_escape(code);
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => strip_pre_wrapper(&highlighted),
            Err(_) => html_escape(code),
        }
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Decorative shell around a rendered code block: window-dot title bar with
/// the language label and a copy affordance.
fn code_shell(label: &str, body: &str) -> String {
    format!(
        r#"<div class="code-block-wrapper my-8 rounded-xl overflow-hidden shadow-2xl border border-slate-800/70 bg-gradient-to-br from-slate-900 via-slate-900 to-slate-950">
<div class="code-block-header bg-gradient-to-r from-slate-800 to-slate-900 px-4 py-3 flex items-center justify-between border-b border-slate-700">
<div class="flex items-center space-x-2">
<div class="flex space-x-1.5">
<div class="w-3 h-3 rounded-full bg-red-500"></div>
<div class="w-3 h-3 rounded-full bg-yellow-500"></div>
<div class="w-3 h-3 rounded-full bg-green-500"></div>
</div>
<span class="text-slate-300 text-xs font-medium ml-3 uppercase tracking-wider">{label}</span>
</div>
<button onclick="navigator.clipboard.writeText(this.closest('.code-block-wrapper').querySelector('code').textContent.trim()); this.textContent='Copied!'; setTimeout(() =&gt; this.textContent='Copy', 2000);" class="px-3 py-1 text-xs font-medium text-slate-300 hover:text-white rounded-md transition-all border border-slate-700 hover:bg-slate-700">Copy</button>
</div>
<pre class="!my-0 !border-0 !shadow-none !rounded-none bg-gradient-to-br from-slate-900 via-slate-900 to-slate-950"><code class="language-{label} block text-slate-100 p-6 overflow-x-auto text-sm md:text-base leading-relaxed font-mono !rounded-none">{body}</code></pre>
</div>"#
    )
}

/// Inject presentational classes into structural opening tags.
///
/// Plain string replacement, left to right, one pass: replacements are never
/// rescanned, so already-styled tags are not touched twice.
fn apply_tag_classes(html: &str) -> String {
    let mut out = html.to_string();
    for (tag, styled) in TAG_CLASSES {
        out = out.replace(tag, styled);
    }
    out
}

/// Wrap every table in a scrollable container div.
///
/// Tables already carrying the marker class are emitted unchanged, which
/// keeps the whole transform idempotent. A table with no closing tag is
/// emitted as-is.
fn wrap_tables(html: &str) -> String {
    const CLOSE: &str = "</table>";

    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(caps) = TABLE_OPEN.captures(rest) {
        let Some(open) = caps.get(0) else { break };
        let attrs = caps.get(1).map(|a| a.as_str()).unwrap_or("");
        out.push_str(&rest[..open.start()]);

        let after = &rest[open.end()..];
        let Some(close_at) = after.find(CLOSE) else {
            out.push_str(open.as_str());
            rest = after;
            continue;
        };
        let inner = &after[..close_at];

        if attrs.contains(TABLE_MARKER) {
            out.push_str(open.as_str());
            out.push_str(inner);
            out.push_str(CLOSE);
        } else {
            out.push_str(TABLE_WRAPPER_OPEN);
            out.push_str(&table_open_with_marker(attrs));
            out.push_str(inner);
            out.push_str(CLOSE);
            out.push_str("</div>");
        }
        rest = &after[close_at + CLOSE.len()..];
    }

    out.push_str(rest);
    out
}

/// Add the marker class to a table opening tag, preserving other attributes
fn table_open_with_marker(attrs: &str) -> String {
    if let Some(caps) = CLASS_ATTR.captures(attrs) {
        let merged = format!(r#"class="{} {}""#, &caps[1], TABLE_MARKER);
        let updated = CLASS_ATTR.replace(attrs, merged.as_str());
        format!("<table{}>", updated)
    } else {
        format!(r#"<table{} class="{}">"#, attrs, TABLE_MARKER)
    }
}

/// Strip the `<pre style="…">…</pre>` wrapper syntect puts around highlighted
/// output; the shell supplies its own pre/code pair.
fn strip_pre_wrapper(highlighted: &str) -> String {
    let trimmed = highlighted.trim();
    let Some(start) = trimmed.find('>') else {
        return trimmed.to_string();
    };
    let Some(end) = trimmed.rfind("</pre>") else {
        return trimmed.to_string();
    };
    if start + 1 > end {
        return trimmed.to_string();
    }
    trimmed[start + 1..end].trim_matches('\n').to_string()
}

/// Decode the entities the CMS editor escapes inside code blocks
fn entity_decode(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
