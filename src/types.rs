//! 供水网络通用类型定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 容量 / 流量数值
pub type Capacity = f64;

/// 相对浮点容差：残量或流量不超过 `容量 × EPSILON` 时视为 0
pub const EPSILON: Capacity = 1e-9;

/// 顶点角色（对流量计算透明，仅作为元数据）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexRole {
    /// 水库（水源）
    Reservoir,
    /// 泵站（中转）
    PumpingStation,
    /// 城市（交付点）
    City,
}

impl VertexRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            VertexRole::Reservoir => "reservoir",
            VertexRole::PumpingStation => "station",
            VertexRole::City => "city",
        }
    }
}

impl fmt::Display for VertexRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VertexRole {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reservoir" | "r" => Ok(VertexRole::Reservoir),
            "station" | "pumping_station" | "pumpingstation" | "ps" => {
                Ok(VertexRole::PumpingStation)
            }
            "city" | "c" => Ok(VertexRole::City),
            other => Err(crate::Error::ImportError(format!("未知的顶点角色: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("Reservoir".parse::<VertexRole>().unwrap(), VertexRole::Reservoir);
        assert_eq!(
            " pumping_station ".parse::<VertexRole>().unwrap(),
            VertexRole::PumpingStation
        );
        assert_eq!("CITY".parse::<VertexRole>().unwrap(), VertexRole::City);
        assert!("lake".parse::<VertexRole>().is_err());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(VertexRole::PumpingStation.to_string(), "station");
    }
}
