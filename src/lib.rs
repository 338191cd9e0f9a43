//! Two-player console chess rules engine: board representation, per-piece
//! movement rules, path clearance, check detection and checkmate search. The
//! console front-end lives in the binary; this library is I/O-free.

#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications
)]
// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery
)]

pub mod chess;
pub mod game;

pub use game::{Game, Player, TurnOutcome};
use shadow_rs::shadow;

shadow!(build);

/// Returns the full version that identifies how the binary was built.
fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints information about the program version and repository on startup.
pub fn print_game_info() {
    println!("Patzer console chess {}", version());
    println!("<https://github.com/oraymond/patzer>");
}
