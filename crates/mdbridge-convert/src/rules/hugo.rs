//! Hugo to Obsidian rewrite rules

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::last_segment;

/// `{{< mermaid >}}...{{< /mermaid >}}`
static MERMAID_SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{<\s*mermaid\s*>\}\}\n?(.*?)\n?\{\{<\s*/mermaid\s*>\}\}")
        .expect("Invalid mermaid shortcode regex")
});

/// `{{< alert >}}...{{< /alert >}}`
static ALERT_SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{<\s*alert\s*>\}\}\n?(.*?)\n?\{\{<\s*/alert\s*>\}\}")
        .expect("Invalid alert shortcode regex")
});

/// `[text]({{< ref "path/post.md" >}})`
static REF_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[([^\]]+)\]\(\{\{<\s*ref\s+"([^"]+)"\s*>\}\}\)"#).expect("Invalid ref link regex")
});

/// `![alt](path)`
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("Invalid image regex"));

/// Convert Hugo markdown to Obsidian markdown.
pub fn hugo_to_obsidian(content: &str) -> String {
    let result = MERMAID_SHORTCODE.replace_all(content, |caps: &Captures| {
        format!("```mermaid\n{}\n```", &caps[1])
    });
    let result = ALERT_SHORTCODE.replace_all(&result, alert_to_callout);
    let result = REF_LINK.replace_all(&result, ref_to_wikilink);
    let result = IMAGE.replace_all(&result, image_to_embed);
    result.into_owned()
}

fn alert_to_callout(caps: &Captures) -> String {
    let mut lines = vec!["> [!info]".to_string()];
    lines.extend(caps[1].trim().split('\n').map(|line| format!("> {}", line)));
    lines.join("\n")
}

fn ref_to_wikilink(caps: &Captures) -> String {
    let text = &caps[1];
    let stripped = caps[2].replace(".md", "");
    let note = last_segment(&stripped);
    if text == note {
        format!("[[{}]]", note)
    } else {
        format!("[[{}|{}]]", note, text)
    }
}

fn image_to_embed(caps: &Captures) -> String {
    let path = &caps[2];
    if path.starts_with("http://") || path.starts_with("https://") {
        return caps[0].to_string();
    }
    format!("![[{}]]", last_segment(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mermaid_becomes_fenced_block() {
        let hugo = "{{< mermaid >}}\ngraph LR\n    A --> B\n{{< /mermaid >}}";
        assert_eq!(hugo_to_obsidian(hugo), "```mermaid\ngraph LR\n    A --> B\n```");
    }

    #[test]
    fn alert_becomes_info_callout() {
        let hugo = "{{< alert >}}\n**Info:** test message\nsecond line\n{{< /alert >}}";
        assert_eq!(
            hugo_to_obsidian(hugo),
            "> [!info]\n> **Info:** test message\n> second line"
        );
    }

    #[test]
    fn ref_with_matching_text_drops_alias() {
        let hugo = r#"[intro]({{< ref "posts/intro.md" >}})"#;
        assert_eq!(hugo_to_obsidian(hugo), "[[intro]]");
    }

    #[test]
    fn remote_images_are_untouched() {
        let hugo = "![logo](https://example.com/logo.png)";
        assert_eq!(hugo_to_obsidian(hugo), hugo);
    }

    #[test]
    fn local_image_keeps_only_file_name() {
        assert_eq!(hugo_to_obsidian("![a photo](images/photo.png)"), "![[photo.png]]");
    }

    #[test]
    fn unterminated_shortcode_passes_through() {
        let hugo = "{{< alert >}}\nnever closed";
        assert_eq!(hugo_to_obsidian(hugo), hugo);
    }
}
