use crate::ResponseParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Written as `=`.
    Success,
    /// Written as `?`.
    Failure,
}

/// A reply to a single command.
///
/// The [`Display`](std::fmt::Display) impl renders the reply line(s) without
/// the terminating blank line, see [`Response::to_wire()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    /// The sequence number of the command this replies to.
    ///
    /// Replies written by [`Response::success()`] and [`Response::failure()`]
    /// always carry one, but other engines may omit it.
    pub id: Option<u64>,
    /// The result for a success, the error message for a failure.
    pub body: String,
}

impl Response {
    pub fn success(id: u64, body: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            id: Some(id),
            body: body.into(),
        }
    }

    pub fn failure(id: u64, message: impl Into<String>) -> Self {
        Self {
            status: Status::Failure,
            id: Some(id),
            body: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// The reply followed by the blank line that marks its end.
    pub fn to_wire(&self) -> String {
        format!("{}\n\n", self)
    }

    /// Parses a reply block as written by an engine.
    ///
    /// The block may span several lines and may still include its terminating
    /// blank line.
    pub fn parse(block: &str) -> Result<Response, ResponseParseError> {
        let block = block.trim_end_matches(['\n', '\r']);
        let mut chars = block.chars();
        let status = match chars.next() {
            None => return Err(ResponseParseError::Empty),
            Some('=') => Status::Success,
            Some('?') => Status::Failure,
            Some(c) => return Err(ResponseParseError::InvalidStatus(c)),
        };

        let rest = chars.as_str();
        let id_len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (id, rest) = rest.split_at(id_len);
        let id = if id.is_empty() {
            None
        } else {
            Some(
                id.parse()
                    .map_err(|_| ResponseParseError::InvalidId(String::from(id)))?,
            )
        };

        let body = match rest.strip_prefix(' ') {
            Some(body) => body,
            None if rest.is_empty() || rest.starts_with('\n') => rest,
            None => {
                let bad_id = rest.split_whitespace().next().unwrap_or(rest);
                return Err(ResponseParseError::InvalidId(String::from(bad_id)));
            }
        };

        Ok(Response {
            status,
            id,
            body: String::from(body),
        })
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Status::Success => write!(f, "=")?,
            Status::Failure => write!(f, "?")?,
        }
        if let Some(id) = self.id {
            write!(f, "{}", id)?;
        }
        if !self.body.is_empty() {
            write!(f, " {}", self.body)?;
        }
        Ok(())
    }
}
