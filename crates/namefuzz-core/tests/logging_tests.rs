//! Subscriber installation; kept in its own binary because the global
//! subscriber can only be set once per process.

use namefuzz_core::{logging, search, MatchError, Options};

#[test]
fn test_init_once() {
    assert!(logging::init_with_filter("namefuzz_core=trace").is_ok());
    assert!(matches!(logging::init(), Err(MatchError::Logging(_))));

    // Events go through the installed subscriber without disturbing results
    let list = ["John Doe", "Jane Smith"];
    assert_eq!(search("Jon Doe", &list, &Options::default()), Some(&"John Doe"));
}
