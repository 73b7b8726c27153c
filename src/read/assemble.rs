//! Record assembly: folding flat (value, definition level, repetition level)
//! triples back into nested rows.
use crate::error::{Error, Result};
use crate::value::Value;

/// Assembles top-level records from parallel level/value sequences.
///
/// `def_levels` may be empty when every value is fully defined; `is_nullable`
/// selects the parity rule that discriminates null ancestors (even levels)
/// from empty lists (odd levels).
///
/// The parity rule assumes OPTIONAL and REPEATED ancestors alternate along
/// the column path. Schemas with consecutive OPTIONAL ancestors can encode
/// definition levels this rule misattributes; a path-walking assembler would
/// resolve those exactly.
pub fn assemble_nested(
    def_levels: &[u32],
    rep_levels: &[u32],
    values: Vec<Value>,
    max_def: u32,
    max_rep: u32,
    is_nullable: bool,
) -> Result<Vec<Value>> {
    let length = def_levels.len().max(rep_levels.len());

    if length == 0 {
        if max_rep == 0 && !values.is_empty() {
            // flat column: one record per value
            return Ok(values);
        }
        if values.is_empty() {
            // nested empty lists, one level per definition level
            if max_def == 0 {
                return Ok(vec![]);
            }
            let mut list = Value::List(vec![]);
            for _ in 1..max_def {
                list = Value::List(vec![list]);
            }
            return Ok(vec![list]);
        }
    }

    // the stack holds the open list containers; index 0 is the root record list
    let mut stack: Vec<Vec<Value>> = vec![vec![]];
    let mut values = values.into_iter();

    for index in 0..length {
        let rep = rep_levels.get(index).copied().unwrap_or(0);
        let def = def_levels.get(index).copied().unwrap_or(max_def);

        if rep < max_rep {
            // close the lists below the continuation depth
            while stack.len() > (rep + 1) as usize {
                let closed = stack
                    .pop()
                    .ok_or_else(|| Error::InternalInvariant("assembly stack underflow".into()))?;
                stack
                    .last_mut()
                    .ok_or_else(|| Error::InternalInvariant("assembly stack underflow".into()))?
                    .push(Value::List(closed));
            }
        }

        // the definition level encodes how many ancestors are present
        let target_depth = if is_nullable {
            (def as usize + 2) / 2
        } else {
            max_rep as usize + 1
        };
        while stack.len() < target_depth {
            stack.push(vec![]);
        }

        let current = stack
            .last_mut()
            .ok_or_else(|| Error::InternalInvariant("assembly stack underflow".into()))?;
        if def == max_def {
            let value = values.next().ok_or_else(|| {
                Error::InternalInvariant("fewer values than defined levels".into())
            })?;
            current.push(value);
        } else if is_nullable {
            if def % 2 == 0 {
                // an even level means a null ancestor
                current.push(Value::Null);
            } else {
                // an odd level means an empty list
                current.push(Value::List(vec![]));
            }
        }
    }

    // close every list still open
    while stack.len() > 1 {
        let closed = stack.pop().unwrap();
        stack
            .last_mut()
            .ok_or_else(|| Error::InternalInvariant("assembly stack underflow".into()))?
            .push(Value::List(closed));
    }
    Ok(stack.pop().unwrap())
}
