use anyhow::{Context, Result};
use swc_common::{comments::SingleThreadedComments, sync::Lrc, FileName, SourceMap};
use swc_ecma_ast::{EsVersion, Program};
use swc_ecma_parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax, TsSyntax};

use crate::source::SourceFile;

/// A parsed file together with the read-only view of its text.
pub struct ParsedScript {
    pub program: Program,
    pub source: SourceFile,
}

pub struct ScriptParser {
    pub source_map: Lrc<SourceMap>,
    pub comments: SingleThreadedComments,
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptParser {
    pub fn new() -> Self {
        Self {
            source_map: Lrc::new(SourceMap::default()),
            comments: SingleThreadedComments::default(),
        }
    }

    pub fn parse(&self, source: &str, filename: &str) -> Result<ParsedScript> {
        let fm = self.source_map.new_source_file(
            Lrc::new(FileName::Custom(filename.to_string())),
            source.to_string(),
        );

        let lexer = Lexer::new(
            syntax_for(filename),
            EsVersion::latest(),
            StringInput::from(&*fm),
            Some(&self.comments),
        );

        let mut parser = Parser::new_from(lexer);

        let program = parser
            .parse_program()
            .map_err(|err| anyhow::anyhow!("Failed to parse {}: {:?}", filename, err.kind()))
            .context("Failed to parse script")?;

        Ok(ParsedScript {
            program,
            source: SourceFile::new(source, fm.start_pos, &self.comments),
        })
    }
}

fn syntax_for(filename: &str) -> Syntax {
    let extension = filename.rsplit('.').next().unwrap_or_default();

    match extension {
        "ts" | "mts" | "cts" | "tsx" => Syntax::Typescript(TsSyntax {
            tsx: extension == "tsx",
            decorators: true,
            no_early_errors: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: extension == "jsx",
            ..Default::default()
        }),
    }
}
