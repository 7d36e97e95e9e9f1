use api_types::{
    operation::{Operation, OperationKind},
    stats::Balance,
};

/// Reduce operations into total income, total expenses and their difference.
///
/// Order does not matter and no rounding is applied.
pub fn calculate_balance(operations: &[Operation]) -> Balance {
    let (income, expenses) =
        operations
            .iter()
            .fold((0.0, 0.0), |(income, expenses), op| match op.kind {
                OperationKind::Income => (income + op.amount, expenses),
                OperationKind::Expense => (income, expenses + op.amount),
            });

    Balance {
        income,
        expenses,
        balance: income - expenses,
    }
}
