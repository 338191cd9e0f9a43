//! Retrieves information about the version of the program from Git and the
//! build environment so that the startup banner can identify the exact build.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
