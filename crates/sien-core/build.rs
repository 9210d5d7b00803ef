fn main() {
    // Validate embedded table files at compile time.
    validate_table("src/data/scheme_enc.txt", include_str!("src/data/scheme_enc.txt"));
    validate_table("src/data/char_type.txt", include_str!("src/data/char_type.txt"));
}

fn validate_table(path: &str, content: &str) {
    let records = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count();
    if records == 0 {
        panic!("{path} contains no records");
    }
    for (i, line) in content.lines().enumerate() {
        if !line.trim().is_empty() && !line.contains('\t') {
            panic!("{path}:{} is missing a tab separator", i + 1);
        }
    }
}
