//! Pulls the "about" block out of a Genius song page.
//!
//! The block is the first `<div>` whose `class` contains
//! `RichText__Container`. Links inside it are dropped along with their
//! text, and the text of each `<p>` becomes one line of output.

const CONTAINER_CLASS: &str = "RichText__Container";

/// Extract the about-text from a song page, or `None` if the page has no
/// container or the container holds no paragraph text.
pub fn extract_about(html: &str) -> Option<String> {
    let container = find_container(html)?;
    let without_links = remove_elements(container, "a");

    let lower = without_links.to_ascii_lowercase();
    let mut lines = Vec::new();
    let mut pos = 0;
    while let Some(start) = find_open_tag(&lower, "p", pos) {
        let Some(span) = element_at(&lower, "p", start) else {
            break;
        };
        let text = compact_whitespace(&decode_entities(&strip_tags(
            &without_links[span.inner_start..span.inner_end],
        )));
        if !text.is_empty() {
            lines.push(text);
        }
        pos = span.end;
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Byte offsets of one element within the searched string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    inner_start: usize,
    inner_end: usize,
    end: usize,
}

/// Inner HTML of the first `<div>` carrying the container class.
fn find_container(html: &str) -> Option<&str> {
    let lower = html.to_ascii_lowercase();
    let mut pos = 0;
    while let Some(start) = find_open_tag(&lower, "div", pos) {
        let tag_end = start + html[start..].find('>')?;
        let tag = &html[start..=tag_end];
        if class_attr(tag).is_some_and(|class| class.contains(CONTAINER_CLASS)) {
            let span = element_at(&lower, "div", start)?;
            return Some(&html[span.inner_start..span.inner_end]);
        }
        pos = tag_end + 1;
    }
    None
}

/// Value of the `class` attribute of an opening tag.
fn class_attr(tag: &str) -> Option<&str> {
    let lower = tag.to_ascii_lowercase();
    let mut pos = 0;
    while let Some(i) = lower[pos..].find("class") {
        let at = pos + i;
        pos = at + "class".len();
        let preceded_by_space = lower[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_whitespace());
        if !preceded_by_space {
            continue;
        }
        let rest = lower[pos..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        let value_start = tag.len() - rest.len();
        return match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let value = &tag[value_start + 1..];
                value.find(quote).map(|end| &value[..end])
            }
            Some(_) => {
                let value = &tag[value_start..];
                let end = value
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(value.len());
                Some(&value[..end])
            }
            None => None,
        };
    }
    None
}

/// Position of the next `<name` opening tag at or after `from`.
/// `lower` must be ASCII-lowercased.
fn find_open_tag(lower: &str, name: &str, from: usize) -> Option<usize> {
    let pattern = format!("<{}", name);
    let mut pos = from;
    while let Some(i) = lower.get(pos..)?.find(&pattern) {
        let at = pos + i;
        let after = at + pattern.len();
        let boundary = lower[after..]
            .chars()
            .next()
            .is_some_and(|c| c == '>' || c == '/' || c.is_ascii_whitespace());
        if boundary {
            return Some(at);
        }
        pos = after;
    }
    None
}

fn find_close_tag(lower: &str, name: &str, from: usize) -> Option<usize> {
    let pattern = format!("</{}", name);
    let mut pos = from;
    while let Some(i) = lower.get(pos..)?.find(&pattern) {
        let at = pos + i;
        let after = at + pattern.len();
        if lower[after..]
            .chars()
            .next()
            .is_none_or(|c| c == '>' || c.is_ascii_whitespace())
        {
            return Some(at);
        }
        pos = after;
    }
    None
}

/// Span of the element whose opening tag starts at `start`, honoring nested
/// elements of the same name. `None` if the element is never closed.
fn element_at(lower: &str, name: &str, start: usize) -> Option<Span> {
    let open_end = start + lower[start..].find('>')?;
    let inner_start = open_end + 1;
    if lower[..open_end].ends_with('/') {
        return Some(Span {
            start,
            inner_start,
            inner_end: inner_start,
            end: inner_start,
        });
    }

    let mut depth = 1usize;
    let mut pos = inner_start;
    loop {
        let next_close = find_close_tag(lower, name, pos)?;
        match find_open_tag(lower, name, pos) {
            Some(open) if open < next_close => {
                depth += 1;
                pos = open + 1;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    let end = lower[next_close..]
                        .find('>')
                        .map_or(lower.len(), |i| next_close + i + 1);
                    return Some(Span {
                        start,
                        inner_start,
                        inner_end: next_close,
                        end,
                    });
                }
                pos = next_close + name.len() + 2;
            }
        }
    }
}

/// Remove every `<name>` element, content included.
fn remove_elements(html: &str, name: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;
    while let Some(start) = find_open_tag(&lower, name, pos) {
        out.push_str(&html[pos..start]);
        pos = match element_at(&lower, name, start) {
            Some(span) => span.end,
            // Unclosed: drop just the opening tag.
            None => lower[start..].find('>').map_or(html.len(), |i| start + i + 1),
        };
    }
    out.push_str(&html[pos..]);
    out
}

fn strip_tags(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_tag = false;

    for character in input.chars() {
        match character {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => output.push(character),
            _ => {}
        }
    }

    output
}

fn decode_entities(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        output.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                output.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                output.push('&');
                rest = &rest[1..];
            }
        }
    }
    output.push_str(rest);
    output
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "nbsp" => Some(' '),
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

fn compact_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "tests/html_tests.rs"]
mod tests;
