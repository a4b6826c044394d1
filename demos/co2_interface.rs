use implicit_gradient::registry::new_patch_field;
use implicit_gradient::{Dictionary, Patch, PatchField};
use ndarray::Array1;

fn main() -> implicit_gradient::Result<()> {
    let patch = Patch::new(
        "interface",
        vec![0, 1, 2],
        Array1::from(vec![100.0, 1000.0, 10000.0]),
    )?;
    let internal = Array1::from(vec![0.01, 0.02, 0.025]);
    let dict = Dictionary::from_json_str(
        r#"{"type": "implicitGradient", "H_cc": 1.0, "D_CO2_l": 1e-9, "C_CO2_g": 0.03, "K_ext": 1e-4}"#,
    )?;
    let mut field = new_patch_field(&patch, "C_CO2", internal.view(), &dict)?;
    field.evaluate(&patch, internal.view())?;

    let mixed = field.mixed();
    println!("face  delta      valueFraction  refValue  value");
    for iface in 0..patch.size() {
        println!(
            "{:4}  {:9.1}  {:13.6}  {:8.4}  {:.6}",
            iface,
            patch.delta_coeffs()[iface],
            mixed.value_fraction()[iface],
            mixed.ref_value()[iface],
            mixed.value()[iface]
        );
    }
    println!("\n{}", field.write()?.to_json_string()?);
    Ok(())
}
