//! Synthetic scalar fields with predictable values.

/// Temperature-like field in Kelvin, roughly 250K top-left to 310K
/// bottom-right.
pub fn create_temperature_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let x_factor = col as f32 / width.max(1) as f32;
            let y_factor = row as f32 / height.max(1) as f32;
            data.push(250.0 + (x_factor * 30.0) + (y_factor * 30.0));
        }
    }
    data
}

/// Field whose value is the flat index, `0.0 ..= (width*height - 1)`.
pub fn create_ramp_grid(width: usize, height: usize) -> Vec<f32> {
    (0..width * height).map(|i| i as f32).collect()
}

/// Field with every row holding that row's index.
///
/// Handy for checking vertical orientation: row `y` is uniformly `y`.
pub fn create_row_index_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        data.extend(std::iter::repeat(row as f32).take(width));
    }
    data
}

/// Field filled with a single value.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}
