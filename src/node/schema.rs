use serde_json::Value;

/// 参数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Image,
    Video,
    String,
    Int,
    Bool,
    Choice,
}

/// 单个参数的声明：名称、类型、默认值与取值约束
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<Value>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub choices: Option<Vec<&'static str>>,
}

impl ParamSpec {
    fn base(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            min: None,
            max: None,
            choices: None,
        }
    }

    pub fn image(name: &'static str) -> Self {
        Self::base(name, ParamKind::Image)
    }

    pub fn video(name: &'static str) -> Self {
        Self::base(name, ParamKind::Video)
    }

    pub fn string(name: &'static str, default: &str) -> Self {
        Self {
            default: Some(Value::String(default.to_string())),
            ..Self::base(name, ParamKind::String)
        }
    }

    pub fn int(name: &'static str, default: i64, min: i64, max: i64) -> Self {
        Self {
            default: Some(Value::from(default)),
            min: Some(min),
            max: Some(max),
            ..Self::base(name, ParamKind::Int)
        }
    }

    pub fn boolean(name: &'static str, default: bool) -> Self {
        Self {
            default: Some(Value::Bool(default)),
            ..Self::base(name, ParamKind::Bool)
        }
    }

    pub fn choice(name: &'static str, choices: &[&'static str], default: &str) -> Self {
        Self {
            default: Some(Value::String(default.to_string())),
            choices: Some(choices.to_vec()),
            ..Self::base(name, ParamKind::Choice)
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// 节点的参数与输出声明
#[derive(Debug, Clone)]
pub struct NodeSchema {
    pub inputs: Vec<ParamSpec>,
    pub outputs: &'static [&'static str],
}

impl NodeSchema {
    pub fn required_inputs(&self) -> impl Iterator<Item = &ParamSpec> {
        self.inputs.iter().filter(|p| p.required)
    }

    pub fn optional_inputs(&self) -> impl Iterator<Item = &ParamSpec> {
        self.inputs.iter().filter(|p| !p.required)
    }
}
