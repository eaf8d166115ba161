//! The asset-splice command-line executable.

fn main() -> anyhow::Result<()> {
    asset_splice::run()
}
