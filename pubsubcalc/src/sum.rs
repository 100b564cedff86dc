use crate::error::AppError;

/// Parses both operands; blank fields are reported before malformed ones.
pub fn parse_operands(number1: &str, number2: &str) -> Result<(isize, isize), AppError> {
    if number1.is_empty() || number2.is_empty() {
        return Err(AppError::MissingField {
            number1: number1.to_owned(),
            number2: number2.to_owned(),
        });
    }

    Ok((parse(number1)?, parse(number2)?))
}

pub fn add(a: isize, b: isize) -> Result<isize, AppError> {
    a.checked_add(b).ok_or(AppError::Overflow(a, b))
}

fn parse(value: &str) -> Result<isize, AppError> {
    value
        .parse()
        .map_err(|_| AppError::Parse(value.to_owned()))
}
