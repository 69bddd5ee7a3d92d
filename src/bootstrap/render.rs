// src/bootstrap/render.rs

//! Renders a [`BootstrapProgram`] as a standalone Rust source file.

use std::fmt::Write;

use crate::bootstrap::escape::quote;
use crate::bootstrap::ir::{BootstrapProgram, FileConstant};

/// The run-time library, pasted into every generated program.
pub const RUNTIME_SOURCE: &str = include_str!("runtime.rs");

const BYTES_PER_LINE: usize = 16;

/// Control flow of every generated program. `{{name}}` placeholders are
/// filled in a single pass, so substituted text is never re-scanned.
const TEMPLATE: &str = r#"// Generated by runpack. Do not edit.
#![allow(dead_code)]

mod runtime {
{{runtime}}
}

const PROJECT_NAME: &str = {{project_name}};

{{file_constants}}
static FILES: [runtime::Embedded; {{file_count}}] = [
{{file_table}}];

static COMMANDS: [&str; {{command_count}}] = [
{{commands}}];

fn main() {
    std::process::exit(runtime::run(PROJECT_NAME, &FILES, &COMMANDS));
}
"#;

pub fn render(program: &BootstrapProgram) -> String {
    fill(TEMPLATE, |key| match key {
        "runtime" => Some(RUNTIME_SOURCE.to_string()),
        "project_name" => Some(quote(&program.project_name)),
        "file_constants" => Some(program.files.iter().map(render_file_constants).collect()),
        "file_count" => Some(program.files.len().to_string()),
        "file_table" => Some(program.files.iter().map(render_table_entry).collect()),
        "command_count" => Some(program.commands.len().to_string()),
        "commands" => Some(
            program
                .commands
                .iter()
                .map(|c| format!("    {},\n", quote(&c.text)))
                .collect(),
        ),
        _ => None,
    })
}

/// Replace each `{{key}}` in `template` with `lookup(key)`. Unknown keys are
/// left in place.
fn fill(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match lookup(key) {
            Some(value) => out.push_str(&value),
            None => {
                out.push_str("{{");
                out.push_str(key);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

fn render_file_constants(file: &FileConstant) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "static {}: [u8; {}] = [", file.data_ident(), file.size());
    for line in file.bytes.chunks(BYTES_PER_LINE) {
        let bytes: Vec<String> = line.iter().map(|b| format!("0x{:02x}", b)).collect();
        let _ = writeln!(out, "    {},", bytes.join(", "));
    }
    let _ = writeln!(out, "];");
    let _ = writeln!(out, "const {}: &str = {};", file.path_ident(), quote(&file.path));
    let _ = writeln!(out, "const {}: usize = {};", file.size_ident(), file.size());
    out.push('\n');
    out
}

fn render_table_entry(file: &FileConstant) -> String {
    format!(
        "    runtime::Embedded {{ path: {}, data: &{}, size: {}, executable: {} }},\n",
        file.path_ident(),
        file.data_ident(),
        file.size_ident(),
        file.executable
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::ir::CommandConstant;

    fn program() -> BootstrapProgram {
        BootstrapProgram {
            project_name: "demo".to_string(),
            files: vec![FileConstant {
                index: 0,
                path: "app/bin/run.sh".to_string(),
                bytes: b"X".to_vec(),
                executable: true,
            }],
            commands: vec![CommandConstant {
                text: "echo hi".to_string(),
            }],
        }
    }

    #[test]
    fn fill_is_single_pass() {
        let out = fill("a {{x}} b {{y}} {{z}}", |key| match key {
            "x" => Some("{{y}}".to_string()),
            "y" => Some("Y".to_string()),
            _ => None,
        });
        assert_eq!(out, "a {{y}} b Y {{z}}");
    }

    #[test]
    fn fill_keeps_unterminated_braces() {
        assert_eq!(fill("x {{open", |_| Some("!".to_string())), "x {{open");
    }

    #[test]
    fn bytes_are_grouped_sixteen_per_line() {
        let file = FileConstant {
            index: 3,
            path: "data.bin".to_string(),
            bytes: (0u8..20).collect(),
            executable: false,
        };
        let text = render_file_constants(&file);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "static FILE_3_DATA: [u8; 20] = [");
        assert_eq!(
            lines[1],
            "    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,"
        );
        assert_eq!(lines[2], "    0x10, 0x11, 0x12, 0x13,");
        assert_eq!(lines[3], "];");
        assert_eq!(lines[4], "const FILE_3_PATH: &str = \"data.bin\";");
        assert_eq!(lines[5], "const FILE_3_SIZE: usize = 20;");
    }

    #[test]
    fn empty_file_renders_an_empty_array() {
        let file = FileConstant {
            index: 0,
            path: "empty".to_string(),
            bytes: Vec::new(),
            executable: false,
        };
        let text = render_file_constants(&file);
        assert!(text.starts_with("static FILE_0_DATA: [u8; 0] = [\n];\n"));
    }

    #[test]
    fn rendered_program_embeds_everything() {
        let source = render(&program());

        assert!(source.contains("mod runtime {"));
        assert!(source.contains("pub fn ensure_parent_dirs"));
        assert!(source.contains("const PROJECT_NAME: &str = \"demo\";"));
        assert!(source.contains("static FILE_0_DATA: [u8; 1] = [\n    0x58,\n];"));
        assert!(source.contains("const FILE_0_PATH: &str = \"app/bin/run.sh\";"));
        assert!(source.contains("const FILE_0_SIZE: usize = 1;"));
        assert!(source.contains("static FILES: [runtime::Embedded; 1] = ["));
        assert!(source.contains(
            "runtime::Embedded { path: FILE_0_PATH, data: &FILE_0_DATA, size: FILE_0_SIZE, executable: true },"
        ));
        assert!(source.contains("static COMMANDS: [&str; 1] = [\n    \"echo hi\",\n];"));
        assert!(!source.contains("{{"));
    }

    #[test]
    fn commands_are_escaped_in_order() {
        let mut program = program();
        program.commands = vec![
            CommandConstant {
                text: "printf \"a\\tb\"".to_string(),
            },
            CommandConstant {
                text: "echo\tdone".to_string(),
            },
        ];
        let source = render(&program);
        let first = source.find("\"printf \\\"a\\\\tb\\\"\",").unwrap();
        let second = source.find("\"echo\\tdone\",").unwrap();
        assert!(first < second);
    }
}
