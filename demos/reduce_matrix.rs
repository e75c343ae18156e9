use anyhow::Result;

// Build a small augmented system, reduce it in place, and
// print both forms as bordered grids.
//
// # Notes
//
// * The system is x + y + z = 6; 2y + 5z = -4;
//   2x + 5y - z = 27, whose unique solution (5, 3, -2)
//   appears in the last column after reduction.
// * Reduction happens in place, so we clone first in order
//   to show the original alongside the result.
fn solve() -> Result<()> {
    let mut system = rref::Matrix::from_rows(vec![
        vec![1.0, 1.0, 1.0, 6.0],
        vec![0.0, 2.0, 5.0, -4.0],
        vec![2.0, 5.0, -1.0, 27.0],
    ])?;

    println!("input:\n{system}");

    let original = system.clone();
    system.rref();

    println!("reduced:\n{system}");
    println!("as yaml:\n{}", system.as_string()?);

    // The original is untouched by the reduction of its clone.
    assert_ne!(original, system);
    Ok(())
}

fn main() -> Result<()> {
    solve()
}
