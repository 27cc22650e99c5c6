//! WGSL shader artifacts and their entry points.

/// Tiled dense matrix multiply, one lane per output element.
pub const MATMUL_WGSL: &str = include_str!("shaders/matmul.wgsl");

/// Entry point of [`MATMUL_WGSL`].
pub const MATMUL_ENTRY: &str = "main";

/// Edge length of the square workgroup declared by [`MATMUL_WGSL`].
pub const MATMUL_TILE: usize = 8;

/// In-place doubling, one single-lane workgroup per element.
pub const DOUBLE_WGSL: &str = include_str!("shaders/double.wgsl");

/// Entry point of [`DOUBLE_WGSL`].
pub const DOUBLE_ENTRY: &str = "compute";

/// Returns all shader sources as `(name, source)` pairs for bulk validation.
pub fn all_shader_sources() -> Vec<(&'static str, &'static str)> {
    vec![("matmul", MATMUL_WGSL), ("double", DOUBLE_WGSL)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use naga::valid::{Capabilities, ValidationFlags, Validator};

    fn validate_wgsl(label: &str, source: &str) -> naga::Module {
        let module =
            naga::front::wgsl::parse_str(source).unwrap_or_else(|err| panic!("{label}: {err:?}"));
        let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
        validator
            .validate(&module)
            .unwrap_or_else(|err| panic!("{label}: {err:?}"));
        module
    }

    fn entry_point<'m>(module: &'m naga::Module, name: &str) -> &'m naga::EntryPoint {
        module
            .entry_points
            .iter()
            .find(|ep| ep.name == name)
            .unwrap_or_else(|| panic!("missing entry point {name}"))
    }

    #[test]
    fn all_shaders_validate() {
        for (label, source) in all_shader_sources() {
            validate_wgsl(label, source);
        }
    }

    #[test]
    fn matmul_workgroup_matches_tile() {
        let module = validate_wgsl("matmul", MATMUL_WGSL);
        let ep = entry_point(&module, MATMUL_ENTRY);
        assert_eq!(ep.stage, naga::ShaderStage::Compute);
        assert_eq!(ep.workgroup_size, [MATMUL_TILE as u32, MATMUL_TILE as u32, 1]);
    }

    #[test]
    fn double_is_single_lane() {
        let module = validate_wgsl("double", DOUBLE_WGSL);
        let ep = entry_point(&module, DOUBLE_ENTRY);
        assert_eq!(ep.workgroup_size, [1, 1, 1]);
    }

    fn block_contains(block: &naga::Block, pred: &dyn Fn(&naga::Statement) -> bool) -> bool {
        block.iter().any(|stmt| statement_contains(stmt, pred))
    }

    fn statement_contains(stmt: &naga::Statement, pred: &dyn Fn(&naga::Statement) -> bool) -> bool {
        use naga::Statement;
        if pred(stmt) {
            return true;
        }
        match stmt {
            Statement::Block(block) => block_contains(block, pred),
            Statement::If { accept, reject, .. } => {
                block_contains(accept, pred) || block_contains(reject, pred)
            }
            Statement::Loop { body, continuing, .. } => {
                block_contains(body, pred) || block_contains(continuing, pred)
            }
            Statement::Switch { cases, .. } => cases.iter().any(|case| block_contains(&case.body, pred)),
            _ => false,
        }
    }

    #[test]
    fn matmul_guards_out_of_range_lanes() {
        use naga::Statement;
        let module = validate_wgsl("matmul", MATMUL_WGSL);
        let body = &entry_point(&module, MATMUL_ENTRY).function.body;

        let is_early_return = |stmt: &Statement| match stmt {
            Statement::If { accept, .. } => {
                block_contains(accept, &|s| matches!(s, Statement::Return { value: None }))
            }
            _ => false,
        };
        let guard = body
            .iter()
            .position(|stmt| is_early_return(stmt))
            .expect("matmul has no early-return bounds check");
        let first_loop = body
            .iter()
            .position(|stmt| statement_contains(stmt, &|s| matches!(s, Statement::Loop { .. })))
            .expect("matmul has no accumulation loop");
        assert!(guard < first_loop, "bounds check must run before accumulating");
    }
}
