//! Injected dictionaries: type abbreviations and display synonyms.

pub mod synonym_dict;
pub mod type_dict;
