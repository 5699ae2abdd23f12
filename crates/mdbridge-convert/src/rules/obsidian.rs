//! Obsidian to Hugo rewrite rules

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// ```` ```mermaid ... ``` ````
static MERMAID_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```mermaid\n(.*?)\n```").expect("Invalid mermaid fence regex")
});

/// A `> [!type]` header line followed by any number of `>` lines.
static CALLOUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^>\s*\[!(\w+)\].*(?:\n>.*)*").expect("Invalid callout regex")
});

static CALLOUT_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>\s*\[!(\w+)\]\s*").expect("Invalid callout header regex"));

static QUOTE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>\s?").expect("Invalid quote prefix regex"));

/// `[[note]]` or `[[note|text]]`; the optional `!` lets embeds be skipped.
static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[\[([^\]]+)\]\]").expect("Invalid wikilink regex"));

/// `![[file.ext]]`
static EMBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\]]+)\]\]").expect("Invalid embed regex"));

/// Convert Obsidian markdown to Hugo markdown.
pub fn obsidian_to_hugo(content: &str) -> String {
    let result = MERMAID_FENCE.replace_all(content, |caps: &Captures| {
        format!("{{{{< mermaid >}}}}\n{}\n{{{{< /mermaid >}}}}", &caps[1])
    });
    let result = CALLOUT.replace_all(&result, callout_to_alert);
    let result = WIKILINK.replace_all(&result, wikilink_to_ref);
    let result = EMBED.replace_all(&result, embed_to_image);
    result.into_owned()
}

fn callout_to_alert(caps: &Captures) -> String {
    let mut body = Vec::new();
    for (i, line) in caps[0].split('\n').enumerate() {
        if i == 0 {
            let after_type = CALLOUT_HEADER.replace(line, "");
            if !after_type.trim().is_empty() {
                body.push(after_type.into_owned());
            }
        } else {
            body.push(QUOTE_PREFIX.replace(line, "").into_owned());
        }
    }

    format!(
        "{{{{< alert >}}}}\n{}\n{{{{< /alert >}}}}",
        body.join("\n").trim()
    )
}

fn wikilink_to_ref(caps: &Captures) -> String {
    if !caps[1].is_empty() {
        // Embeds are handled by the image rule
        return caps[0].to_string();
    }

    let inner = &caps[2];
    let (note, text) = inner.split_once('|').unwrap_or((inner, inner));
    let note = if note.ends_with(".md") {
        note.to_string()
    } else {
        format!("{}.md", note)
    };

    format!("[{}]({{{{< ref \"{}\" >}}}})", text, note)
}

fn embed_to_image(caps: &Captures) -> String {
    // Drop an Obsidian display size such as `|300`
    let target = caps[1].split('|').next().unwrap_or_default();
    if !target.contains('.') || target.ends_with(".md") {
        // Note transclusion, not a file
        return caps[0].to_string();
    }
    format!("![]({})", target)
}
