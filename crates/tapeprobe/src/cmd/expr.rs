use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;

use tapeprobe_expr::{tokenize, Token, TokenKind};

use crate::cmd::ExprArgs;
use crate::exit::{expr_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct TokenOutput<'a> {
    kind: &'static str,
    text: &'a str,
}

pub fn run(args: ExprArgs, format: OutputFormat) -> CliResult<i32> {
    let tokens = tokenize(&args.input).map_err(expr_error)?;
    print_tokens(&tokens, format);
    Ok(SUCCESS)
}

fn print_tokens(tokens: &[Token], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for token in tokens {
                println!("{token}");
            }
        }
        OutputFormat::Json => {
            let out: Vec<TokenOutput> = tokens
                .iter()
                .map(|t| TokenOutput {
                    kind: kind_name(t.kind),
                    text: &t.text,
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(vec!["KIND", "TEXT"]);
            for token in tokens {
                table.add_row(vec![kind_name(token.kind).to_string(), token.text.clone()]);
            }
            println!("{table}");
        }
    }
}

fn kind_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Number => "number",
        TokenKind::Operator => "operator",
    }
}
