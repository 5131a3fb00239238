//! Binary for building WASM contracts from the yield vault modules.
#![doc = "Binary for building WASM contracts from odra modules."]

#[allow(unused_imports)]
use yield_vaults;

fn main() {
    // Invoked by the Odra build system; odra-build does the compilation
}
