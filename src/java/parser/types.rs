//! Types, code references and type arguments.

use bitflags::bitflags;

use super::Parser;

bitflags! {
    /// Type forms that are only valid in some positions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct TypeFlags: u8 {
        /// `String...` in the last parameter.
        const ELLIPSIS    = 1;
        /// `? extends T` in type arguments.
        const WILDCARD    = 1 << 1;
        /// `A | B` in catch parameters.
        const DISJUNCTION = 1 << 2;
    }
}

impl Parser<'_, '_> {
    /// Parses a `TYPE`. Returns `false` without consuming anything if no type starts here.
    pub(super) fn type_(&mut self, flags: TypeFlags) -> bool {
        let checkpoint = self.checkpoint();
        if flags.contains(TypeFlags::WILDCARD) && self.at(self.t.quest) {
            self.start(self.t.type_element);
            self.bump();
            if self.at_any(&[self.t.extends_keyword, self.t.super_keyword]) {
                self.bump();
                if !self.type_(TypeFlags::empty()) {
                    self.expect(self.t.identifier);
                }
            }
            self.finish_node();
            return true;
        }

        if self.current().map_or(false, |kind| self.language.is_primitive(kind)) {
            self.start(self.t.type_element);
            self.bump();
            self.finish_node();
        } else if self.at(self.t.identifier) {
            self.start(self.t.type_element);
            self.code_reference(true);
            self.finish_node();
        } else {
            return false;
        }

        while self.at(self.t.lbracket) && self.nth_at(1, self.t.rbracket) {
            self.start_at(checkpoint, self.t.type_element);
            self.bump_n(2);
            self.finish_node();
        }
        if flags.contains(TypeFlags::ELLIPSIS) && self.at(self.t.ellipsis) {
            self.start_at(checkpoint, self.t.type_element);
            self.bump();
            self.finish_node();
        }
        if flags.contains(TypeFlags::DISJUNCTION) && self.at(self.t.or) {
            self.start_at(checkpoint, self.t.type_element);
            while self.eat(self.t.or) {
                if !self.type_(TypeFlags::empty()) {
                    self.expect(self.t.identifier);
                }
            }
            self.finish_node();
        }
        true
    }

    /// Parses a possibly qualified `JAVA_CODE_REFERENCE` starting at an identifier. Each
    /// segment carries a `REFERENCE_PARAMETER_LIST`, which holds type arguments only when
    /// `type_args` is set.
    pub(super) fn code_reference(&mut self, type_args: bool) {
        let checkpoint = self.checkpoint();
        self.start(self.t.java_code_reference);
        self.bump();
        self.reference_parameter_list(type_args);
        self.finish_node();
        while self.at(self.t.dot) && self.nth_at(1, self.t.identifier) {
            self.start_at(checkpoint, self.t.java_code_reference);
            self.bump_n(2);
            self.reference_parameter_list(type_args);
            self.finish_node();
        }
    }

    pub(super) fn reference_parameter_list(&mut self, type_args: bool) {
        if !(type_args && self.at(self.t.lt)) {
            self.start_in_place(self.t.reference_parameter_list);
            self.finish_node();
            return;
        }
        self.start(self.t.reference_parameter_list);
        if self.eat(self.t.lt) {
            // `<>` is the diamond
            if !self.at(self.t.gt) {
                loop {
                    if !self.type_(TypeFlags::WILDCARD) {
                        self.expect(self.t.identifier);
                    }
                    if !self.eat(self.t.comma) {
                        break;
                    }
                }
            }
            self.expect(self.t.gt);
        }
        self.finish_node();
    }

    /// Looks ahead for a type starting at the `n`-th significant token, returning the offset
    /// just past it.
    pub(super) fn scan_type(&self, mut n: usize) -> Option<usize> {
        let kind = self.nth(n)?;
        if self.language.is_primitive(kind) {
            n += 1;
        } else if kind == self.t.identifier {
            n += 1;
            loop {
                if self.nth_at(n, self.t.lt) {
                    n = self.scan_type_arguments(n)?;
                }
                if self.nth_at(n, self.t.dot) && self.nth_at(n + 1, self.t.identifier) {
                    n += 2;
                } else {
                    break;
                }
            }
        } else {
            return None;
        }
        while self.nth_at(n, self.t.lbracket) && self.nth_at(n + 1, self.t.rbracket) {
            n += 2;
        }
        Some(n)
    }

    fn scan_type_arguments(&self, mut n: usize) -> Option<usize> {
        let t = &self.t;
        let allowed = [
            t.identifier,
            t.dot,
            t.comma,
            t.quest,
            t.extends_keyword,
            t.super_keyword,
            t.lbracket,
            t.rbracket,
            t.and,
        ];
        let mut depth = 0usize;
        loop {
            let kind = self.nth(n)?;
            if kind == t.lt {
                depth += 1;
            } else if kind == t.gt {
                depth -= 1;
                if depth == 0 {
                    return Some(n + 1);
                }
            } else if !allowed.contains(&kind) && !self.language.is_primitive(kind) {
                return None;
            }
            n += 1;
        }
    }
}
