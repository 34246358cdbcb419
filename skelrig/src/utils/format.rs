//! Formatting utilities

use glam::{Quat, Vec3};

/// Parse `x,y,z` into a vector
pub fn parse_vec3(text: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{text}'"));
    }

    let mut values = [0.0f32; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse::<f32>()
            .map_err(|e| format!("invalid component '{part}': {e}"))?;
    }
    Ok(Vec3::from_array(values))
}

/// Format a vector with fixed precision
pub fn format_vec3(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}

/// Format a rotation as axis and angle in degrees
pub fn format_rotation(q: Quat) -> String {
    let (axis, angle) = q.to_axis_angle();
    if angle.abs() < 1e-4 {
        "identity".to_string()
    } else {
        format!("{:.1}° about {}", angle.to_degrees(), format_vec3(axis))
    }
}

/// Format a child index list
pub fn format_indices(indices: &[usize]) -> String {
    if indices.is_empty() {
        "-".to_string()
    } else {
        indices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1,2,3"), Ok(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(parse_vec3(" -1.5, 0 ,2e1"), Ok(Vec3::new(-1.5, 0.0, 20.0)));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,3").is_err());
    }

    #[test]
    fn test_format_vec3() {
        assert_eq!(format_vec3(Vec3::new(1.0, -0.5, 2.25)), "(1.000, -0.500, 2.250)");
    }

    #[test]
    fn test_format_rotation() {
        assert_eq!(format_rotation(Quat::IDENTITY), "identity");
        assert_eq!(
            format_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
            "90.0° about (0.000, 0.000, 1.000)"
        );
    }

    #[test]
    fn test_format_indices() {
        assert_eq!(format_indices(&[]), "-");
        assert_eq!(format_indices(&[1, 4]), "1, 4");
    }
}
