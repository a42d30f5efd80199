use std::env;
use std::io;
use std::io::Write;
use std::process;

use gatree::node::Node;
use gatree::{simplify_tree, Err};

fn usage(prog_name: &str) -> String {
  format!(
    r"
Usage: {} [EXPR] [options]

Reads an expression from EXPR if given, else prompts interactively.
Expressions use the round-tripped grammar `simplify_tree` itself emits,
e.g. (e1^e2), inv(e1), *(-1.00,e1,e2).

Options:
  -h, --help            Print this message
  -t, --trace           Print the pass-by-pass rewrite trace
  --max-iters N         Stop after N driver iterations (default: unlimited)
  --no-tracing          Disable the tracing-subscriber env-filter logger",
    prog_name
  )
}

fn simplify_and_print(expr: &str, max_iters: Option<u32>, print_trace: bool) -> Result<(), Err> {
  let root: Node = expr.parse()?;

  let mut trace = Vec::new();
  let result = simplify_tree(root, max_iters, None, |line| trace.push(line.to_string()));

  if print_trace {
    for line in &trace {
      println!("  {}", line);
    }
  }

  match result {
    Ok(simplified) => println!("{}", simplified),
    Err(e) => println!("error: {}", e),
  }

  Ok(())
}

fn main() -> Result<(), Err> {
  let opts: Vec<String> = env::args().collect();
  let prog_name = opts[0].clone();

  let mut print_trace = false;
  let mut max_iters: Option<u32> = None;
  let mut enable_tracing = true;
  let mut expr: Option<String> = None;

  let mut args = opts.into_iter().skip(1).peekable();
  while let Some(arg) = args.next() {
    if arg == "-h" || arg == "--help" {
      println!("{}", usage(&prog_name));
      process::exit(0);
    } else if arg == "-t" || arg == "--trace" {
      print_trace = true;
    } else if arg == "--no-tracing" {
      enable_tracing = false;
    } else if arg == "--max-iters" {
      let value = args.next().ok_or("--max-iters requires a value")?;
      max_iters = Some(value.parse()?);
    } else if expr.is_none() {
      expr = Some(arg);
    } else {
      println!("{}", usage(&prog_name));
      process::exit(1);
    }
  }

  if enable_tracing {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();
  }

  if let Some(expr) = expr {
    return simplify_and_print(&expr, max_iters, print_trace);
  }

  let mut input = String::new();
  loop {
    print!("> ");
    io::stdout().flush()?;

    input.clear();
    match io::stdin().read_line(&mut input) {
      Ok(0) => return Ok(()), // ctrl+d
      Ok(_) => {
        let line = input.trim();
        if !line.is_empty() {
          simplify_and_print(line, max_iters, print_trace)?;
        }
      }
      Err(error) => return Err(error.into()),
    }
  }
}
