/// Host-side counterpart of the doubling kernel.
pub fn double(data: &[f32]) -> Vec<f32> {
    data.iter().map(|x| x * 2.0).collect()
}
