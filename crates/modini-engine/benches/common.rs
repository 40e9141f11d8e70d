// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_mod_ini(size: usize) -> String {
    let mut out = String::from("; generated\n\n[Constants]\nglobal persist $swapvar = 0\n\n");
    for i in 0..size {
        out.push_str(&format!(
            "[TextureOverridePart{i}]\nhash = {i:08x}\nmatch_first_index = {i}\nrun = CommandListPart{i}\n\n\
             [CommandListPart{i}]\nif $swapvar == 0\n    ib = ResourcePart{i}IB\nendif\n\n\
             [ResourcePart{i}IB]\ntype = Buffer\nformat = DXGI_FORMAT_R32_UINT ; index buffer\nfilename = Part{i}.ib\n\n"
        ));
    }
    out
}
