//! Transaction list, create and delete flows.

use std::sync::Arc;

use crate::domain::entities::TransactionKind;
use crate::domain::queries::{AccountQuery, DeleteTransactionQuery, TransactionListQuery};
use crate::domain::results::ResultTO;
use crate::domain::services::{
    AccountService, CounterPartyService, ReferenceService, TransactionService,
    TransactionTypeService,
};
use crate::error::AppError;
use crate::web::controller::issue_resolver::{self, CREATE_TRANSACTION_FIELDS};
use crate::web::controller::view::{CreateOutcome, CreateTransactionPage};
use crate::web::forms::{BoundForm, FormErrors, TransactionForm};
use crate::web::paths;
use crate::web::session::{CurrentCustomer, TransactionListSession};

/// Total page count reported by the list page regardless of the result size.
pub const LEGACY_TOTAL_PAGES: u32 = 26;

/// Mediates transaction requests between the web layer and the collaborator
/// services.
///
/// Holds no per-request state. Every operation takes the caller's
/// [`CurrentCustomer`] and scopes its queries to that customer key.
///
/// # Example
///
/// ```rust,ignore
/// let store = Arc::new(MemoryStore::new());
/// let controller = TransactionController::new(
///     store.clone(),
///     store.clone(),
///     store.clone(),
///     store.clone(),
///     store,
/// );
/// ```
#[derive(Clone)]
pub struct TransactionController {
    transaction_service: Arc<dyn TransactionService>,
    transaction_type_service: Arc<dyn TransactionTypeService>,
    counter_party_service: Arc<dyn CounterPartyService>,
    account_service: Arc<dyn AccountService>,
    reference_service: Arc<dyn ReferenceService>,
    page_size: u32,
}

impl TransactionController {
    pub fn new(
        transaction_service: Arc<dyn TransactionService>,
        transaction_type_service: Arc<dyn TransactionTypeService>,
        counter_party_service: Arc<dyn CounterPartyService>,
        account_service: Arc<dyn AccountService>,
        reference_service: Arc<dyn ReferenceService>,
    ) -> Self {
        Self {
            transaction_service,
            transaction_type_service,
            counter_party_service,
            account_service,
            reference_service,
            page_size: TransactionListQuery::DEFAULT_PAGE_SIZE,
        }
    }

    /// Overrides the page size requested from the transaction service.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Deletes one of the caller's transactions.
    ///
    /// Always answers with the list route to redirect to. Business issues (an
    /// unknown or foreign transaction) are logged, not surfaced.
    ///
    /// # Errors
    ///
    /// Propagates infrastructure failures from the transaction service.
    pub async fn delete_transaction(
        &self,
        customer: &CurrentCustomer,
        transaction_key: i64,
    ) -> Result<&'static str, AppError> {
        let query = DeleteTransactionQuery {
            transaction_key,
            customer_key: customer.customer_key(),
        };

        match self.transaction_service.delete_transaction(query).await? {
            ResultTO::Success(deleted) => {
                tracing::info!(
                    customer_key = query.customer_key,
                    transaction_key = deleted.transaction_key,
                    "Transaction deleted"
                );
            }
            ResultTO::Issues(log) => {
                tracing::warn!(
                    customer_key = query.customer_key,
                    transaction_key,
                    codes = ?log.codes(),
                    "Transaction delete rejected"
                );
            }
        }

        Ok(paths::TRANSACTION_LIST)
    }

    /// Fetches the caller's transactions into the list session.
    ///
    /// The current page is reset to 1 and the total page count is fixed at
    /// [`LEGACY_TOTAL_PAGES`]. A rejected fetch leaves an empty list.
    ///
    /// # Errors
    ///
    /// Propagates infrastructure failures from the transaction service.
    pub async fn list_transactions(
        &self,
        customer: &CurrentCustomer,
        mut session: TransactionListSession,
    ) -> Result<TransactionListSession, AppError> {
        let query = TransactionListQuery::for_customer(customer.customer_key(), self.page_size);
        let result = self.transaction_service.fetch_transactions(query).await?;

        if let Some(log) = result.issue_log() {
            tracing::warn!(
                customer_key = customer.customer_key(),
                codes = ?log.codes(),
                "Transaction list rejected"
            );
        }

        session.paginator.current_page = 1;
        session.paginator.page_size = result.page_size();
        // TODO: derive from result.total_count() and page_size once product signs off on paging.
        session.paginator.total_pages = LEGACY_TOTAL_PAGES;
        session.transactions = result.into_list();
        session.initialized = true;

        Ok(session)
    }

    /// Builds a blank create form for the caller.
    ///
    /// # Errors
    ///
    /// Propagates infrastructure failures from any reference data service.
    pub async fn show_create_form(
        &self,
        customer: &CurrentCustomer,
    ) -> Result<CreateTransactionPage, AppError> {
        self.create_page(customer.customer_key(), TransactionForm::default(), FormErrors::new())
            .await
    }

    /// Submits a bound create form on behalf of the caller.
    ///
    /// The query is tagged with the caller's customer key and always submitted.
    /// Returned issues are resolved on top of the binding errors, so fields the
    /// form could not convert and business rules are reported together.
    /// Fields left unbound reach the service as blank.
    ///
    /// # Errors
    ///
    /// Propagates infrastructure failures from the services.
    pub async fn submit_create_form(
        &self,
        customer: &CurrentCustomer,
        bound: BoundForm,
    ) -> Result<CreateOutcome, AppError> {
        let BoundForm {
            form,
            query,
            errors,
        } = bound;
        let customer_key = customer.customer_key();

        if errors.has_errors() {
            tracing::debug!(
                customer_key,
                fields = ?errors.field_names(),
                "Create form failed binding"
            );
        }

        let query = query.with_customer(customer_key);

        match self.transaction_service.create_transaction(query).await? {
            ResultTO::Success(created) => {
                if errors.has_errors() {
                    tracing::warn!(
                        customer_key,
                        transaction_key = created.transaction_key,
                        fields = ?errors.field_names(),
                        "Transaction created despite binding errors"
                    );
                }
                tracing::info!(
                    customer_key,
                    transaction_key = created.transaction_key,
                    "Transaction created"
                );
                Ok(CreateOutcome::Created(created))
            }
            ResultTO::Issues(log) => {
                tracing::debug!(customer_key, codes = ?log.codes(), "Transaction create rejected");
                let errors = issue_resolver::resolve(&log, &CREATE_TRANSACTION_FIELDS, errors);
                let page = self.create_page(customer_key, form, errors).await?;
                Ok(CreateOutcome::Rejected(Box::new(page)))
            }
        }
    }

    async fn create_page(
        &self,
        customer_key: i64,
        form: TransactionForm,
        errors: FormErrors,
    ) -> Result<CreateTransactionPage, AppError> {
        let (transaction_types, counter_parties, currencies, accounts) = tokio::try_join!(
            self.transaction_type_service
                .find_transaction_type_list_for_customer(customer_key),
            self.counter_party_service
                .fetch_counter_party_list(customer_key),
            self.reference_service.fetch_currency_list(),
            self.account_service
                .fetch_accounts(AccountQuery { customer_key }),
        )?;

        Ok(CreateTransactionPage {
            form,
            transaction_types: transaction_types.into_list(),
            counter_parties: counter_parties.into_list(),
            currencies,
            kinds: TransactionKind::ALL.to_vec(),
            accounts: accounts.into_list(),
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AccountTO, CounterPartyTO, TransactionTO, TransactionTypeTO};
    use crate::domain::issues::IssueLog;
    use crate::domain::issues::codes::{create_transaction, delete_transaction};
    use crate::domain::queries::TransactionCreateQuery;
    use crate::domain::results::ResultListTO;
    use crate::domain::services::{
        MockAccountService, MockCounterPartyService, MockReferenceService,
        MockTransactionService, MockTransactionTypeService,
    };
    use crate::web::session::Paginator;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use serde_json::json;

    const CUSTOMER: i64 = 7;

    fn customer() -> CurrentCustomer {
        CurrentCustomer {
            customer_key: CUSTOMER,
            session_id: "session".to_string(),
        }
    }

    fn transaction(transaction_key: i64) -> TransactionTO {
        TransactionTO {
            transaction_key,
            customer_key: CUSTOMER,
            account_key: 1,
            account_name: "Cash".to_string(),
            transaction_type_key: 2,
            transaction_type_name: "Food".to_string(),
            counter_party_key: None,
            counter_party_name: None,
            kind: TransactionKind::Expense,
            amount: Decimal::new(500, 2),
            currency: "BYN".to_string(),
            description: "Coffee".to_string(),
            process_date: Utc::now(),
        }
    }

    fn reference_mocks() -> (
        MockTransactionTypeService,
        MockCounterPartyService,
        MockAccountService,
        MockReferenceService,
    ) {
        let mut types = MockTransactionTypeService::new();
        types
            .expect_find_transaction_type_list_for_customer()
            .withf(|key| *key == CUSTOMER)
            .returning(|key| {
                Ok(ResultListTO::of(vec![TransactionTypeTO {
                    transaction_type_key: 2,
                    customer_key: key,
                    name: "Food".to_string(),
                    description: None,
                }]))
            });

        let mut parties = MockCounterPartyService::new();
        parties
            .expect_fetch_counter_party_list()
            .withf(|key| *key == CUSTOMER)
            .returning(|key| {
                Ok(ResultListTO::of(vec![CounterPartyTO {
                    counter_party_key: 3,
                    customer_key: key,
                    name: "Grocery store".to_string(),
                }]))
            });

        let mut accounts = MockAccountService::new();
        accounts
            .expect_fetch_accounts()
            .withf(|query| query.customer_key == CUSTOMER)
            .returning(|query| {
                Ok(ResultListTO::of(vec![AccountTO {
                    account_key: 1,
                    customer_key: query.customer_key,
                    name: "Cash".to_string(),
                    currency: "BYN".to_string(),
                    balance: Decimal::ZERO,
                }]))
            });

        let mut reference = MockReferenceService::new();
        reference
            .expect_fetch_currency_list()
            .returning(|| Ok(vec!["BYN".to_string(), "USD".to_string()]));

        (types, parties, accounts, reference)
    }

    fn controller(transactions: MockTransactionService) -> TransactionController {
        let (types, parties, accounts, reference) = reference_mocks();
        TransactionController::new(
            Arc::new(transactions),
            Arc::new(types),
            Arc::new(parties),
            Arc::new(accounts),
            Arc::new(reference),
        )
    }

    fn submitted_form(amount: &str) -> TransactionForm {
        TransactionForm {
            account: "1".to_string(),
            transaction_type: "2".to_string(),
            counter_party: String::new(),
            kind: "expense".to_string(),
            amount: amount.to_string(),
            currency: "BYN".to_string(),
            description: "Coffee".to_string(),
        }
    }

    fn rejected_page(outcome: CreateOutcome) -> CreateTransactionPage {
        match outcome {
            CreateOutcome::Rejected(page) => *page,
            CreateOutcome::Created(t) => panic!("expected rejection, got {:?}", t),
        }
    }

    #[tokio::test]
    async fn test_delete_passes_id_and_customer() {
        let mut transactions = MockTransactionService::new();
        transactions
            .expect_delete_transaction()
            .withf(|query| {
                *query
                    == DeleteTransactionQuery {
                        transaction_key: 42,
                        customer_key: CUSTOMER,
                    }
            })
            .times(1)
            .returning(|query| Ok(ResultTO::Success(transaction(query.transaction_key))));

        let target = controller(transactions)
            .delete_transaction(&customer(), 42)
            .await
            .unwrap();

        assert_eq!(target, paths::TRANSACTION_LIST);
    }

    #[tokio::test]
    async fn test_delete_redirects_to_list_on_issues() {
        let mut transactions = MockTransactionService::new();
        transactions
            .expect_delete_transaction()
            .times(1)
            .returning(|_| {
                let mut log = IssueLog::new();
                log.add(delete_transaction::TRANSACTION_NOT_FOUND);
                Ok(ResultTO::Issues(log))
            });

        let target = controller(transactions)
            .delete_transaction(&customer(), 404)
            .await
            .unwrap();

        assert_eq!(target, paths::TRANSACTION_LIST);
    }

    #[tokio::test]
    async fn test_delete_propagates_infrastructure_errors() {
        let mut transactions = MockTransactionService::new();
        transactions
            .expect_delete_transaction()
            .returning(|_| Err(AppError::internal("storage down", json!({}))));

        let result = controller(transactions)
            .delete_transaction(&customer(), 1)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_list_resets_page_and_fixes_total_pages() {
        let mut transactions = MockTransactionService::new();
        transactions
            .expect_fetch_transactions()
            .withf(|query| query.customer_key == CUSTOMER && query.page == 1 && query.page_size == 5)
            .times(1)
            .returning(|_| {
                Ok(ResultListTO::Listed {
                    list: vec![transaction(1), transaction(2)],
                    page_size: 5,
                    total_count: 2,
                })
            });

        let previous = TransactionListSession {
            transactions: Vec::new(),
            paginator: Paginator {
                current_page: 4,
                page_size: 50,
                total_pages: 3,
            },
            initialized: false,
        };

        let session = controller(transactions)
            .with_page_size(5)
            .list_transactions(&customer(), previous)
            .await
            .unwrap();

        assert!(session.initialized);
        assert_eq!(session.transactions.len(), 2);
        assert_eq!(
            session.paginator,
            Paginator {
                current_page: 1,
                page_size: 5,
                total_pages: LEGACY_TOTAL_PAGES,
            }
        );
    }

    #[tokio::test]
    async fn test_list_total_pages_ignores_result_size() {
        let mut transactions = MockTransactionService::new();
        transactions.expect_fetch_transactions().returning(|_| {
            Ok(ResultListTO::Listed {
                list: Vec::new(),
                page_size: 20,
                total_count: 0,
            })
        });

        let session = controller(transactions)
            .list_transactions(&customer(), TransactionListSession::default())
            .await
            .unwrap();

        assert!(session.transactions.is_empty());
        assert_eq!(session.paginator.total_pages, 26);
        assert_eq!(session.paginator.current_page, 1);
    }

    #[tokio::test]
    async fn test_list_with_issues_stores_empty_list() {
        let mut transactions = MockTransactionService::new();
        transactions
            .expect_fetch_transactions()
            .returning(|_| Ok(ResultListTO::Issues(IssueLog::new())));

        let previous = TransactionListSession {
            transactions: vec![transaction(9)],
            ..Default::default()
        };

        let session = controller(transactions)
            .list_transactions(&customer(), previous)
            .await
            .unwrap();

        assert!(session.transactions.is_empty());
        assert_eq!(session.paginator.total_pages, LEGACY_TOTAL_PAGES);
    }

    #[tokio::test]
    async fn test_show_create_form_loads_reference_data() {
        let page = controller(MockTransactionService::new())
            .show_create_form(&customer())
            .await
            .unwrap();

        assert_eq!(page.form, TransactionForm::default());
        assert_eq!(page.transaction_types[0].name, "Food");
        assert_eq!(page.counter_parties[0].name, "Grocery store");
        assert_eq!(page.currencies, vec!["BYN", "USD"]);
        assert_eq!(page.kinds, vec![TransactionKind::Income, TransactionKind::Expense]);
        assert_eq!(page.accounts[0].name, "Cash");
        assert!(!page.errors.has_errors());
    }

    #[tokio::test]
    async fn test_submit_success_tags_customer() {
        let mut transactions = MockTransactionService::new();
        transactions
            .expect_create_transaction()
            .withf(|query: &TransactionCreateQuery| {
                query.customer_key == CUSTOMER && query.amount == Some(Decimal::new(350, 2))
            })
            .times(1)
            .returning(|_| Ok(ResultTO::Success(transaction(11))));

        let outcome = controller(transactions)
            .submit_create_form(&customer(), submitted_form("3.50").bind())
            .await
            .unwrap();

        assert!(matches!(outcome, CreateOutcome::Created(t) if t.transaction_key == 11));
    }

    #[tokio::test]
    async fn test_submit_negative_amount_marks_amount_field() {
        let mut transactions = MockTransactionService::new();
        transactions
            .expect_create_transaction()
            .times(1)
            .returning(|_| {
                let mut log = IssueLog::new();
                log.add(create_transaction::AMOUNT_IS_INCORRECT);
                Ok(ResultTO::Issues(log))
            });

        let outcome = controller(transactions)
            .submit_create_form(&customer(), submitted_form("-5").bind())
            .await
            .unwrap();
        let page = rejected_page(outcome);

        assert!(page.errors.has_field("amount"));
        assert_eq!(page.form.amount, "-5");
        assert_eq!(page.form.description, "Coffee");
        assert_eq!(page.accounts.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_marks_every_mapped_field() {
        let mut transactions = MockTransactionService::new();
        transactions.expect_create_transaction().returning(|_| {
            let mut log = IssueLog::new();
            log.add(create_transaction::AMOUNT_IS_MANDATORY);
            log.add(create_transaction::DESCRIPTION_IS_TOO_LARGE);
            log.add(create_transaction::CURRENCY_IS_NOT_MATCH_WITH_ACCOUNT_CURRENCY);
            Ok(ResultTO::Issues(log))
        });

        let outcome = controller(transactions)
            .submit_create_form(&customer(), submitted_form("").bind())
            .await
            .unwrap();
        let page = rejected_page(outcome);

        assert_eq!(
            page.errors.field_names(),
            vec!["amount", "currency", "description"]
        );
        assert!(page.errors.general().is_empty());
    }

    #[tokio::test]
    async fn test_submit_unmapped_code_adds_no_field_error() {
        let mut transactions = MockTransactionService::new();
        transactions.expect_create_transaction().returning(|_| {
            let mut log = IssueLog::new();
            log.add(create_transaction::TRANSACTION_TYPE_NOT_FOUND);
            Ok(ResultTO::Issues(log))
        });

        let outcome = controller(transactions)
            .submit_create_form(&customer(), submitted_form("1").bind())
            .await
            .unwrap();
        let page = rejected_page(outcome);

        assert!(page.errors.field_names().is_empty());
        assert_eq!(page.errors.general(), ["Transaction type not found"]);
    }

    #[tokio::test]
    async fn test_submit_binding_errors_merge_with_issues() {
        let mut transactions = MockTransactionService::new();
        transactions
            .expect_create_transaction()
            .withf(|query| query.customer_key == CUSTOMER && query.amount.is_none())
            .times(1)
            .returning(|_| {
                let mut log = IssueLog::new();
                log.add(create_transaction::AMOUNT_IS_MANDATORY);
                log.add(create_transaction::DESCRIPTION_IS_MANDATORY);
                Ok(ResultTO::Issues(log))
            });

        let mut form = submitted_form("lots");
        form.description = String::new();

        let outcome = controller(transactions)
            .submit_create_form(&customer(), form.bind())
            .await
            .unwrap();
        let page = rejected_page(outcome);

        assert_eq!(
            page.errors.field("amount"),
            ["Amount must be a number", "Amount is required"]
        );
        assert_eq!(page.errors.field("description"), ["Description is required"]);
        assert_eq!(page.form.amount, "lots");
    }

    #[tokio::test]
    async fn test_submit_success_with_unbound_counter_party_redirects() {
        let mut transactions = MockTransactionService::new();
        transactions
            .expect_create_transaction()
            .withf(|query| query.counter_party_key.is_none())
            .times(1)
            .returning(|_| Ok(ResultTO::Success(transaction(11))));

        let mut form = submitted_form("5");
        form.counter_party = "shop".to_string();

        let outcome = controller(transactions)
            .submit_create_form(&customer(), form.bind())
            .await
            .unwrap();

        assert!(matches!(outcome, CreateOutcome::Created(t) if t.transaction_key == 11));
    }
}
