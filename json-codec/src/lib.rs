//! A [`numshape_core::TokenSource`] back-end for JSON, built directly on
//! [`jiter`]'s pull parser.
//!
//! `jiter` never materializes a `serde_json::Value`-like tree: `peek()` tells
//! you the kind of the next token, and a matching `known_*` call consumes it.
//! Containers (`next_array`/`array_step`, `next_object`/`next_key`) are
//! driven the same way, one element at a time. This module's only job is to
//! turn that shape into the start/end event vocabulary [`numshape_core::decode`]
//! expects, since jiter itself never emits an explicit "array ended" token --
//! it just returns `None` from the next `_step` call.

mod errors;

use std::borrow::Cow;

use jiter::{Jiter, NumberAny, NumberInt, Peek};
use numshape_core::{Error, Event, TokenSource};

use crate::errors::lex_error;

#[derive(Debug, Clone, Copy)]
enum Frame {
    Array { started: bool },
    Object { started: bool, awaiting_value: bool },
}

/// Drives a [`jiter::Jiter`] as a [`numshape_core::TokenSource`].
///
/// One instance reads exactly one JSON document: build it over the whole
/// input buffer, hand it to [`numshape_core::decode`], and discard it.
pub struct JsonTokenSource<'a> {
    jiter: Jiter<'a>,
    stack: Vec<Frame>,
}

impl<'a> JsonTokenSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        JsonTokenSource {
            jiter: Jiter::new(data),
            stack: Vec::new(),
        }
    }

    fn read_value(&mut self, peek: Peek) -> Result<Event<'a>, Error> {
        match peek {
            Peek::Null => {
                self.jiter.known_null().map_err(lex_error)?;
                Ok(Event::Null)
            }
            Peek::True | Peek::False => {
                let b = self.jiter.known_bool(peek).map_err(lex_error)?;
                Ok(Event::Bool(b))
            }
            Peek::String => {
                let s = self.jiter.known_str().map_err(lex_error)?;
                Ok(Event::Str(Cow::Owned(s.to_string())))
            }
            Peek::Array => {
                self.stack.push(Frame::Array { started: false });
                Ok(Event::SeqStart(None))
            }
            Peek::Object => {
                self.stack.push(Frame::Object {
                    started: false,
                    awaiting_value: false,
                });
                Ok(Event::MapStart(None))
            }
            _ => match self.jiter.known_number(peek).map_err(lex_error)? {
                NumberAny::Int(NumberInt::Int(i)) => Ok(Event::Int(i)),
                NumberAny::Int(NumberInt::BigInt(_)) => {
                    Err(Error::Parse("integer out of i64 range".to_string()))
                }
                NumberAny::Float(f) => Ok(Event::Float(f)),
            },
        }
    }
}

impl<'a> TokenSource<'a> for JsonTokenSource<'a> {
    type Error = Error;

    fn next_event(&mut self) -> Result<Event<'a>, Error> {
        let Some(frame) = self.stack.last().copied() else {
            let peek = self.jiter.peek().map_err(lex_error)?;
            return self.read_value(peek);
        };

        match frame {
            Frame::Object {
                awaiting_value: true,
                ..
            } => {
                if let Some(Frame::Object { awaiting_value, .. }) = self.stack.last_mut() {
                    *awaiting_value = false;
                }
                let peek = self.jiter.peek().map_err(lex_error)?;
                self.read_value(peek)
            }
            Frame::Object { started, .. } => {
                let key = if !started {
                    if let Some(Frame::Object { started, .. }) = self.stack.last_mut() {
                        *started = true;
                    }
                    self.jiter.next_object().map_err(lex_error)?
                } else {
                    self.jiter.next_key().map_err(lex_error)?
                };
                match key {
                    Some(k) => {
                        if let Some(Frame::Object { awaiting_value, .. }) = self.stack.last_mut() {
                            *awaiting_value = true;
                        }
                        Ok(Event::MapKey(Cow::Owned(k.to_string())))
                    }
                    None => {
                        self.stack.pop();
                        Ok(Event::MapEnd)
                    }
                }
            }
            Frame::Array { started } => {
                let next = if !started {
                    if let Some(Frame::Array { started }) = self.stack.last_mut() {
                        *started = true;
                    }
                    self.jiter.next_array().map_err(lex_error)?
                } else {
                    self.jiter.array_step().map_err(lex_error)?
                };
                match next {
                    Some(peek) => self.read_value(peek),
                    None => {
                        self.stack.pop();
                        Ok(Event::SeqEnd)
                    }
                }
            }
        }
    }

    fn finish(&mut self) -> Result<(), Error> {
        self.jiter.finish().map_err(lex_error)
    }
}
