//! Examples of using the radix tree
use radix_params::{Settings, SortingTechnique, Tree};

fn main() {
    // Create a new tree with the default grammar ('@', '*', '/')
    let mut tree = Tree::new();

    // Insert some values
    tree.add("tomato", 1).unwrap();
    tree.add("tornado", 2).unwrap();
    tree.add("tom", 3).unwrap();

    // Check values
    assert_eq!(tree.value("tomato"), Some(&1));
    assert_eq!(tree.value("tom"), Some(&3));
    assert_eq!(tree.value("to"), None);

    // (root) -> "to" -> "m" -> "ato"
    //                -> "rnado"
    assert_eq!(tree.len(), 5);
    println!("{}", tree);

    // Deleting "tom" folds its only child back into the edge
    tree.del("tom");
    assert_eq!(tree.len(), 4);

    // Sort siblings so the heaviest subtrees are tried first
    tree.sort(SortingTechnique::Priority);

    // Debug rendering shows node counts, leaves and values
    let mut debug = Tree::with_settings(Settings::default().debug(true)).unwrap();
    debug.add("romane", "a").unwrap();
    debug.add("romanus", "b").unwrap();
    debug.add("romulus", "c").unwrap();
    println!("{}", debug);
}
