/// 页面顶部的提示条
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Banner {
    #[default]
    None,
    Error(String),
    Success(String),
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Banner::Error(message.into())
    }

    pub fn success(message: impl Into<String>) -> Self {
        Banner::Success(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Banner::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Banner::None => None,
            Banner::Error(m) | Banner::Success(m) => Some(m),
        }
    }

    /// 重新加载成功后清掉旧的错误提示，保留成功提示
    pub fn clear_error(self) -> Self {
        match self {
            Banner::Error(_) => Banner::None,
            other => other,
        }
    }
}
