use pulldown_cmark::{Event, Parser, Tag};
use textwrap::{wrap, Options};

/// Renders markdown answers as wrapped, lightly styled terminal text.
/// Policy answers are prose: paragraphs, bullet lists, emphasis, and
/// the occasional verbatim block. Code blocks are emitted as indented
/// plain text.
pub struct MarkdownRenderer {
    wrap_options: Options<'static>,
}

impl MarkdownRenderer {
    pub fn new(width: usize) -> Self {
        let wrap_options = Options::new(width)
            .initial_indent("  ")
            .subsequent_indent("  ");

        Self { wrap_options }
    }

    pub fn render(&self, text: &str) -> String {
        let parser = Parser::new(text);
        let mut output = String::new();
        let mut in_code_block = false;
        let mut in_list = false;
        let mut current_paragraph = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(_)) => {
                    self.flush_paragraph(&mut output, &mut current_paragraph);
                    in_code_block = true;
                    output.push('\n');
                }
                Event::End(Tag::CodeBlock(_)) => {
                    in_code_block = false;
                    output.push('\n');
                }
                Event::Start(Tag::List(_)) => {
                    self.flush_paragraph(&mut output, &mut current_paragraph);
                    in_list = true;
                }
                Event::End(Tag::List(_)) => {
                    in_list = false;
                    output.push('\n');
                }
                Event::Start(Tag::Item) => {
                    self.flush_paragraph(&mut output, &mut current_paragraph);
                    current_paragraph.push_str("• ");
                }
                Event::End(Tag::Item) => {
                    self.flush_paragraph(&mut output, &mut current_paragraph);
                }
                Event::Start(Tag::Heading(..)) => {
                    self.flush_paragraph(&mut output, &mut current_paragraph);
                    current_paragraph.push_str("\x1B[1m");
                }
                Event::End(Tag::Heading(..)) => {
                    current_paragraph.push_str("\x1B[22m");
                    self.flush_paragraph(&mut output, &mut current_paragraph);
                    output.push('\n');
                }
                Event::Start(Tag::Paragraph) => {
                    if !current_paragraph.is_empty() {
                        self.flush_paragraph(&mut output, &mut current_paragraph);
                    }
                }
                Event::End(Tag::Paragraph) => {
                    self.flush_paragraph(&mut output, &mut current_paragraph);
                    if !in_list {
                        output.push('\n');
                    }
                }
                Event::Start(Tag::Emphasis) => {
                    current_paragraph.push_str("\x1B[3m"); // Italic
                }
                Event::End(Tag::Emphasis) => {
                    current_paragraph.push_str("\x1B[23m"); // Reset italic
                }
                Event::Start(Tag::Strong) => {
                    current_paragraph.push_str("\x1B[1m"); // Bold
                }
                Event::End(Tag::Strong) => {
                    current_paragraph.push_str("\x1B[22m"); // Reset bold
                }
                Event::Code(text) => {
                    current_paragraph.push('`');
                    current_paragraph.push_str(&text);
                    current_paragraph.push('`');
                }
                Event::Text(text) => {
                    if in_code_block {
                        for line in text.lines() {
                            output.push_str("    ");
                            output.push_str(line);
                            output.push('\n');
                        }
                    } else {
                        current_paragraph.push_str(&text);
                    }
                }
                Event::SoftBreak => {
                    current_paragraph.push(' ');
                }
                Event::HardBreak => {
                    self.flush_paragraph(&mut output, &mut current_paragraph);
                    output.push('\n');
                }
                _ => {}
            }
        }

        self.flush_paragraph(&mut output, &mut current_paragraph);
        output.trim_end().to_string()
    }

    fn flush_paragraph(&self, output: &mut String, current: &mut String) {
        if !current.is_empty() {
            if current.starts_with('•') {
                // List items wrap with a hanging indent
                let mut list_options = self.wrap_options.clone();
                list_options.initial_indent = "  ";
                list_options.subsequent_indent = "    ";
                for line in wrap(current, &list_options) {
                    output.push_str(&line);
                    output.push('\n');
                }
            } else {
                for line in wrap(current, &self.wrap_options) {
                    output.push_str(&line);
                    output.push('\n');
                }
            }
            current.clear();
        }
    }
}
