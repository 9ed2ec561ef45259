//! List the key names accepted by `--exitkey`.

use guirecord_script_engine::KeyTable;

pub fn run() -> anyhow::Result<()> {
    println!("Named keys (case-insensitive):");
    for name in KeyTable::named_keys() {
        println!("  {name}");
    }
    println!();
    println!("Any single printable character is also accepted.");
    Ok(())
}
