use leptos::*;

use crate::api::{ApiClient, ApiError, CreateUserRequest, User};
use crate::pages::users::repository::UsersRepository;
use crate::utils::message::MessageState;

pub(super) fn validate_new_user(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    if username.trim().is_empty() {
        return Err(ApiError::validation("Nazwa użytkownika jest wymagana"));
    }
    if !email.contains('@') {
        return Err(ApiError::validation("Podaj prawidłowy adres email"));
    }
    if password.len() < 8 {
        return Err(ApiError::validation("Hasło musi mieć co najmniej 8 znaków"));
    }
    Ok(())
}

#[derive(Clone, Copy)]
pub struct UsersViewModel {
    pub username: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub message: RwSignal<MessageState>,
    pub pending_delete: RwSignal<Option<User>>,
    pub users_resource: Resource<u32, Result<Vec<User>, ApiError>>,
    pub create_action: Action<CreateUserRequest, Result<User, ApiError>>,
    pub delete_action: Action<i64, Result<(), ApiError>>,
    reload: RwSignal<u32>,
}

impl UsersViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(UsersRepository::new(api));

        let username = create_rw_signal(String::new());
        let email = create_rw_signal(String::new());
        let password = create_rw_signal(String::new());
        let message = create_rw_signal(MessageState::default());
        let pending_delete = create_rw_signal(None::<User>);
        let reload = create_rw_signal(0u32);

        let users_resource = create_resource(
            move || reload.get(),
            move |_| {
                let repo = repository.get_value();
                async move { repo.list().await }
            },
        );

        let create_action = create_action(move |request: &CreateUserRequest| {
            let repo = repository.get_value();
            let request = request.clone();
            async move { repo.create(request).await }
        });

        let delete_action = leptos::create_action(move |id: &i64| {
            let repo = repository.get_value();
            let id = *id;
            async move { repo.delete(id).await }
        });

        {
            create_effect(move |_| {
                if let Some(result) = create_action.value().get() {
                    match result {
                        Ok(_) => {
                            message.update(|m| m.set_success("Utworzono użytkownika."));
                            username.set(String::new());
                            email.set(String::new());
                            password.set(String::new());
                            reload.update(|value| *value = value.wrapping_add(1));
                        }
                        Err(err) => message.update(|m| m.set_error(err)),
                    }
                }
            });
        }

        {
            create_effect(move |_| {
                if let Some(result) = delete_action.value().get() {
                    match result {
                        Ok(_) => {
                            message.update(|m| m.set_success("Usunięto użytkownika."));
                            reload.update(|value| *value = value.wrapping_add(1));
                        }
                        Err(err) => message.update(|m| m.set_error(err)),
                    }
                }
            });
        }

        Self {
            username,
            email,
            password,
            message,
            pending_delete,
            users_resource,
            create_action,
            delete_action,
            reload,
        }
    }

    pub fn submit_new_user(&self) {
        if self.create_action.pending().get_untracked() {
            return;
        }
        let username = self.username.get_untracked();
        let email = self.email.get_untracked();
        let password = self.password.get_untracked();
        if let Err(err) = validate_new_user(&username, &email, &password) {
            self.message.update(|m| m.set_error(err));
            return;
        }
        self.create_action.dispatch(CreateUserRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password,
        });
    }

    pub fn request_delete(&self, user: User) {
        self.pending_delete.set(Some(user));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    pub fn confirm_delete(&self) {
        if let Some(user) = self.pending_delete.get_untracked() {
            self.pending_delete.set(None);
            self.delete_action.dispatch(user.id);
        }
    }
}

pub fn use_users_view_model() -> UsersViewModel {
    match use_context::<UsersViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = UsersViewModel::new();
            provide_context(vm);
            vm
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validate_new_user;

    #[test]
    fn new_user_validation_checks_each_field() {
        assert!(validate_new_user("", "a@b.pl", "dlugiehaslo").is_err());
        assert!(validate_new_user("nowy", "niepoprawny", "dlugiehaslo").is_err());
        assert!(validate_new_user("nowy", "a@b.pl", "krotkie").is_err());
        assert!(validate_new_user("nowy", "a@b.pl", "dlugiehaslo").is_ok());
    }
}
