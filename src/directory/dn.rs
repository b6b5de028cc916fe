// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
//! # Distinguished names
//!
//! Structural parsing of the RFC 4514 string representation of the DN. The
//! parser only checks the syntax: a valid DN does not imply that the entry
//! exists in the directory.
//!
//! It is used to decide whether an identifier refers to a directory entry
//! (`uid=jdoe,ou=Users,dc=example,dc=com`) or to a database row (`8e1a...`).
use std::fmt;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

use crate::directory::error::DirectoryError;

/// Single `type=value` pair of the RDN.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    /// Attribute type (descriptor or numeric OID).
    pub attr_type: String,
    /// Unescaped attribute value.
    pub value: String,
}

/// Relative distinguished name. Multi-valued RDNs are joined with `+`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelativeDistinguishedName(pub Vec<AttributeTypeAndValue>);

/// Parsed distinguished name, most specific RDN first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistinguishedName {
    rdns: Vec<RelativeDistinguishedName>,
}

impl DistinguishedName {
    /// RDNs of the name, leftmost first.
    pub fn rdns(&self) -> &[RelativeDistinguishedName] {
        &self.rdns
    }
}

/// Validate the candidate DN.
///
/// Returns `None` when the string is not a DN. The empty string is not
/// considered to be a DN.
pub fn valid_dn<S: AsRef<str>>(candidate: S) -> Option<DistinguishedName> {
    candidate.as_ref().parse().ok()
}

impl FromStr for DistinguishedName {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DirectoryError::InvalidDnSyntax(s.to_string());
        if s.trim().is_empty() {
            return Err(invalid());
        }
        let mut chars = s.chars().peekable();
        let mut rdns = Vec::new();
        let mut avas = Vec::new();
        loop {
            avas.push(parse_ava(&mut chars).ok_or_else(invalid)?);
            match chars.next() {
                None => {
                    rdns.push(RelativeDistinguishedName(std::mem::take(&mut avas)));
                    break;
                }
                Some('+') => {}
                Some(',') | Some(';') => {
                    rdns.push(RelativeDistinguishedName(std::mem::take(&mut avas)));
                }
                Some(_) => return Err(invalid()),
            }
        }
        Ok(Self { rdns })
    }
}

fn parse_ava(chars: &mut Peekable<Chars>) -> Option<AttributeTypeAndValue> {
    while chars.next_if_eq(&' ').is_some() {}

    let mut attr_type = String::new();
    loop {
        match chars.next()? {
            '=' => break,
            c => attr_type.push(c),
        }
    }
    let attr_type = attr_type.trim_end().to_string();
    if !valid_attr_type(&attr_type) {
        return None;
    }

    while chars.next_if_eq(&' ').is_some() {}

    let value = if chars.next_if_eq(&'#').is_some() {
        parse_hex_value(chars)?
    } else {
        parse_string_value(chars)?
    };
    Some(AttributeTypeAndValue { attr_type, value })
}

fn valid_attr_type(attr_type: &str) -> bool {
    let mut chars = attr_type.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        Some(c) if c.is_ascii_digit() => attr_type
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())),
        _ => false,
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, ',' | ';' | '+')
}

fn parse_hex_value(chars: &mut Peekable<Chars>) -> Option<String> {
    let mut hex = String::new();
    while let Some(c) = chars.next_if(|c| !is_separator(*c)) {
        hex.push(c);
    }
    let hex = hex.trim_end();
    if hex.is_empty() || hex.len() % 2 != 0 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("#{hex}"))
}

fn parse_string_value(chars: &mut Peekable<Chars>) -> Option<String> {
    let mut value: Vec<u8> = Vec::new();
    // Unescaped spaces are kept aside until a non space character follows.
    let mut pending_spaces = 0;
    while let Some(c) = chars.next_if(|c| !is_separator(*c)) {
        match c {
            ' ' => {
                pending_spaces += 1;
                continue;
            }
            '"' | '<' | '>' | '\0' => return None,
            _ => {}
        }
        value.extend(std::iter::repeat_n(b' ', pending_spaces));
        pending_spaces = 0;
        if c == '\\' {
            match chars.next()? {
                special @ (' ' | '"' | '#' | '+' | ',' | ';' | '<' | '=' | '>' | '\\') => {
                    value.push(special as u8);
                }
                hi if hi.is_ascii_hexdigit() => {
                    let lo = chars.next().filter(char::is_ascii_hexdigit)?;
                    let byte = u8::from_str_radix(&format!("{hi}{lo}"), 16).ok()?;
                    value.push(byte);
                }
                _ => return None,
            }
        } else {
            let mut buf = [0u8; 4];
            value.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }
    String::from_utf8(value).ok()
}

fn escape_value(value: &str) -> String {
    if value.starts_with('#') && value.len() > 1 {
        return value.to_string();
    }
    let last = value.chars().count().saturating_sub(1);
    let mut res = String::with_capacity(value.len());
    for (idx, c) in value.chars().enumerate() {
        match c {
            '"' | '+' | ',' | ';' | '<' | '>' | '\\' | '=' => {
                res.push('\\');
                res.push(c);
            }
            ' ' if idx == 0 || idx == last => res.push_str("\\ "),
            _ => res.push(c),
        }
    }
    res
}

impl fmt::Display for RelativeDistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, ava) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("+")?;
            }
            write!(f, "{}={}", ava.attr_type, escape_value(&ava.value))?;
        }
        Ok(())
    }
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, rdn) in self.rdns.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{rdn}")?;
        }
        Ok(())
    }
}
