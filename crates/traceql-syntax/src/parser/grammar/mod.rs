//! Grammar productions for TraceQL queries.
//!
//! The top level of a query is a spanset pipeline expression: one or more
//! pipelines (`{ filter } | stage | ...`) joined by spanset combining
//! operators (`&&`, `||`, `>>`, `<<`, `~`). Field-level expressions inside
//! `{}` live in the `expressions` module.
//!
//! Error recovery is shape-preserving: every skipped or missing region
//! becomes an `Error` node whose parent and previous sibling identify what
//! was being parsed, which is what the diagnostics layer dispatches on.

pub(crate) mod expressions;

use crate::lexer::TokenKind;
use crate::parser::{CompletedMarker, Parser};
use crate::syntax::SyntaxKind;

impl Parser<'_> {
    /// Parse the root of a query.
    pub(crate) fn parse_query(&mut self) {
        self.start_node(SyntaxKind::Query);

        if !self.at_end() {
            if self.at(TokenKind::LBrace) {
                self.parse_spanset_pipeline_expression();
            } else {
                self.error("expected a spanset filter");
                self.error_until(|_| true);
            }
        }

        self.finish_node();
    }

    /// Parse pipelines joined by spanset combining operators.
    pub(crate) fn parse_spanset_pipeline_expression(&mut self) -> CompletedMarker {
        let mut lhs = self.parse_spanset_pipeline();

        loop {
            let current = self.current();
            if current == TokenKind::Eof {
                break;
            }

            if current.is_spanset_combining() {
                let marker = lhs.precede(self);
                self.bump();
                if self.at(TokenKind::LBrace) {
                    self.parse_spanset_pipeline();
                } else {
                    self.error("expected spanset expression after combining operator");
                    self.missing();
                }
                lhs = marker.complete(self, SyntaxKind::SpansetPipelineExpression);
            } else {
                // Junk between pipelines, including a second spanset with no
                // combining operator in front of it.
                self.error("expected spanset combining operator");
                let marker = lhs.precede(self);
                self.error_spanset_or_junk();
                lhs = marker.complete(self, SyntaxKind::SpansetPipelineExpression);
            }
        }

        lhs
    }

    /// Wraps either one balanced `{...}` or a run of loose tokens in an
    /// `Error` node.
    fn error_spanset_or_junk(&mut self) {
        if self.at(TokenKind::LBrace) {
            self.start_node(SyntaxKind::Error);
            let mut depth = 0u32;
            while !self.at_end() {
                match self.current() {
                    TokenKind::LBrace => depth += 1,
                    TokenKind::RBrace => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            self.bump();
                            break;
                        }
                    }
                    _ => {}
                }
                self.bump();
            }
            self.finish_node();
        } else {
            self.error_until(|kind| {
                kind != TokenKind::LBrace && !kind.is_spanset_combining()
            });
        }
    }

    /// Parse one pipeline: a spanset filter followed by `|`-separated stages.
    pub(crate) fn parse_spanset_pipeline(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.parse_spanset_filter();

        while self.at(TokenKind::Pipe) {
            self.bump();
            match self.current() {
                TokenKind::KwBy => self.parse_group_operation(),
                TokenKind::KwSelect => self.parse_select_operation(),
                TokenKind::KwCoalesce => self.parse_coalesce_operation(),
                kind if kind.can_start_scalar_operand() => self.parse_scalar_filter(),
                _ => {
                    self.error("expected aggregation operator after pipeline operator");
                    if self.at_end() || self.current().is_spanset_combining() {
                        self.missing();
                    } else {
                        self.error_until(|kind| {
                            kind != TokenKind::Pipe && !kind.is_spanset_combining()
                        });
                    }
                }
            }
        }

        marker.complete(self, SyntaxKind::SpansetPipelineExpression)
    }

    /// Parse a spanset filter: `{ expr? }`.
    pub(crate) fn parse_spanset_filter(&mut self) {
        let marker = self.start();
        self.bump(); // `{`

        if !self.at(TokenKind::RBrace) && !self.at_end() {
            self.parse_field_expression();
        }

        if !self.at(TokenKind::RBrace) {
            self.error("expected '}'");
            if self.at_end() {
                self.missing();
            } else {
                self.error_until(|kind| kind != TokenKind::RBrace);
            }
        }
        if self.at(TokenKind::RBrace) {
            self.bump();
        }

        marker.complete(self, SyntaxKind::SpansetFilter);
    }

    /// Parse a `by(...)` grouping operation.
    fn parse_group_operation(&mut self) {
        let marker = self.start();
        self.bump(); // `by`
        self.parse_operation_args();
        marker.complete(self, SyntaxKind::GroupOperation);
    }

    /// Parse a `select(...)` operation.
    fn parse_select_operation(&mut self) {
        let marker = self.start();
        self.bump(); // `select`
        self.parse_operation_args();
        marker.complete(self, SyntaxKind::SelectOperation);
    }

    /// Parse the parenthesized field list shared by `by` and `select`.
    fn parse_operation_args(&mut self) {
        if !self.at(TokenKind::LParen) {
            self.error("expected '('");
            self.missing_field_ref();
            return;
        }
        self.bump(); // `(`

        if self.at(TokenKind::RParen) || self.at_end() {
            self.error("expected a field reference");
            self.missing_field_ref();
        } else if self.current().can_start_field_operand() {
            self.parse_field_expression();
            while self.at(TokenKind::Comma) {
                self.bump();
                if self.current().can_start_field_operand() {
                    self.parse_field_expression();
                } else {
                    self.error("expected a field reference after ','");
                    self.missing_field_ref();
                }
            }
        } else {
            self.error("expected a field reference");
            self.start_node(SyntaxKind::IntrinsicField);
            self.error_until(|kind| kind != TokenKind::RParen);
            self.finish_node();
        }

        if self.at(TokenKind::RParen) {
            self.bump();
        } else {
            self.error("expected ')'");
        }
    }

    /// Parse a `coalesce()` operation.
    fn parse_coalesce_operation(&mut self) {
        let marker = self.start();
        self.bump(); // `coalesce`
        if self.at(TokenKind::LParen) {
            self.bump();
            if !self.at(TokenKind::RParen) && !self.at_end() {
                self.error("coalesce takes no arguments");
                self.error_until(|kind| kind != TokenKind::RParen);
            }
            if self.at(TokenKind::RParen) {
                self.bump();
            } else {
                self.error("expected ')'");
            }
        } else {
            self.error("expected '('");
            self.missing();
        }
        marker.complete(self, SyntaxKind::CoalesceOperation);
    }

    /// Parse a scalar filter stage: `avg(duration) > 1s`.
    fn parse_scalar_filter(&mut self) {
        let marker = self.start();
        self.parse_scalar_operand();

        if self.current().is_comparison() {
            self.start_node(SyntaxKind::ComparisonOp);
            self.bump();
            self.finish_node();

            if self.current().can_start_scalar_operand() {
                self.parse_scalar_operand();
            } else {
                self.error("expected value after comparison operator");
                self.missing();
            }
        } else if self.at_end()
            || self.at(TokenKind::Pipe)
            || self.current().is_spanset_combining()
        {
            self.error("expected comparison operator");
            self.missing();
        } else {
            self.error("expected comparison operator");
            self.error_until(|kind| {
                kind != TokenKind::Pipe && !kind.is_spanset_combining()
            });
        }

        marker.complete(self, SyntaxKind::ScalarFilter);
    }

    /// Parse a scalar operand, wrapped in a `ScalarExpression` node.
    fn parse_scalar_operand(&mut self) {
        let marker = self.start();
        match self.current() {
            kind if kind.is_aggregate() => self.parse_aggregate(),
            kind if kind.can_start_static() => self.parse_static(),
            _ => {
                self.error("expected scalar value");
                self.missing();
            }
        }
        marker.complete(self, SyntaxKind::ScalarExpression);
    }

    /// Parse an aggregate invocation: `count()`, `avg(duration)`.
    fn parse_aggregate(&mut self) {
        let marker = self.start();
        let takes_argument = self.current() != TokenKind::KwCount;
        self.bump(); // aggregate keyword

        if self.at(TokenKind::LParen) {
            self.bump();
            if takes_argument {
                if self.at(TokenKind::RParen) || self.at_end() {
                    self.error("expected a field reference");
                    self.missing_field_ref();
                } else if self.current().can_start_field_operand() {
                    self.parse_field_expression();
                } else {
                    self.error("expected a field reference");
                    self.start_node(SyntaxKind::IntrinsicField);
                    self.error_until(|kind| kind != TokenKind::RParen);
                    self.finish_node();
                }
            } else if !self.at(TokenKind::RParen) && !self.at_end() {
                self.error("count takes no arguments");
                self.error_until(|kind| kind != TokenKind::RParen);
            }

            if self.at(TokenKind::RParen) {
                self.bump();
            } else {
                self.error("expected ')'");
            }
        } else {
            self.error("expected '('");
            self.missing();
        }

        marker.complete(self, SyntaxKind::Aggregate);
    }

    /// Records a missing field reference: an `IntrinsicField` wrapping an
    /// empty `Error` node, naming the production that was expected here.
    fn missing_field_ref(&mut self) {
        self.start_node(SyntaxKind::IntrinsicField);
        self.missing();
        self.finish_node();
    }
}
