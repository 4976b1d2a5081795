use sorted_lookup::{Lookup, SortedLookup};

fn main() {
    let mut names = SortedLookup::build([
        ("z", "Zillah"),
        ("a", "Amy"),
        ("c", "Clara"),
        ("b", "Basil"),
    ]);

    for key in names.keys() {
        println!("{key} => {}", names[key]);
    }

    assert_eq!(names.get("c"), Ok(&"Clara"));
    assert!(!names.contains("m"));

    match names.get("m") {
        Ok(v) => println!("m => {v}"),
        Err(e) => println!("{e}"),
    }

    if let Err(e) = names.try_set("m", "something") {
        println!("{e}");
    }
}
