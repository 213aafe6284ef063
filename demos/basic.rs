use bunner_glob_rs::{PatternResult, compile, escape_meta, match_once};

fn main() -> PatternResult<()> {
    let go_files = compile("*.go", None)?;
    let files = ["main.go", "test.go", "readme.txt", "config.json"];

    println!("go files:");
    for file in files.iter().filter(|file| go_files.matches(file)) {
        println!("  {file}");
    }

    let samples = [
        ("a*c", "abc", "simple wildcard"),
        ("a?c", "abc", "single character"),
        ("a**c", "a/b/c", "super wildcard (crosses directories)"),
        ("[abc]", "b", "character class"),
        ("[!abc]", "x", "negated character class"),
        ("[a-z]", "m", "range"),
        ("{go,js,py}", "py", "alternatives"),
        ("*.{go,js}", "main.go", "combined patterns"),
        ("**/*.go", "src/main.go", "recursive glob"),
    ];

    println!("\npattern examples:");
    for (pattern, text, description) in samples {
        let status = if match_once(pattern, text)? { "yes" } else { "no" };
        println!("  {pattern:<15} {text:<12} {status:<3} {description}");
    }

    let path_pattern = compile("*.go", Some('/'))?;
    println!("\nwith path separators:");
    for path in ["main.go", "dir/main.go", "file.txt"] {
        if path_pattern.matches(path) {
            println!("  {path} matches {path_pattern}");
        }
    }

    let escaped = escape_meta("file[1].txt");
    println!("\nescaped pattern: {escaped}");
    println!(
        "matches 'file[1].txt': {}",
        match_once(&escaped, "file[1].txt")?
    );

    Ok(())
}
